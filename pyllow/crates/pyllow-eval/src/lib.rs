//! pyllow-eval - Tree-Walking Evaluator
//!
//! The last pipeline stage: an [`Interpreter`] processes a parsed tree
//! in place. The root's children are handled in order; a child that
//! evaluates to a value is substituted by a `Computed` node (the
//! canonical result slot) and its value collected, a child that runs
//! only for effect (assignment, `if`) is removed from the root's child
//! list. The interpreter owns the global scope frame, which persists
//! across runs so the interactive shell accumulates bindings.
//!
//! Name resolution goes through an explicit [`ScopeStack`] rather than
//! parent-pointer walking: reads search innermost-out, writes land in
//! the innermost frame whose is-scope bit is set. Blocks push a
//! non-scope frame, so `a = 1` inside an `if` binds in the enclosing
//! scope.

pub mod scope;

pub use scope::ScopeStack;

use pyllow_par::{Ast, BinaryOp, MonoKind, NodeId, NodeKind, UnaryOp};
use pyllow_util::{PyllowError, PyllowResult, Value};

/// Evaluator with a persistent global scope.
pub struct Interpreter {
    scopes: ScopeStack,
}

impl Interpreter {
    /// Create an interpreter with an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
        }
    }

    /// The global bindings in insertion order.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.scopes.globals()
    }

    /// Execute the tree: fix parent links, then process the root's
    /// children in order, substituting expression results in place and
    /// removing statements. Returns the expression results.
    pub fn execute(&mut self, ast: &mut Ast) -> PyllowResult<Vec<Value>> {
        ast.set_parents();

        let children: Vec<NodeId> = ast.children(ast.root()).to_vec();
        let mut kept = Vec::new();
        let mut results = Vec::new();

        for child in children {
            match self.process(ast, child)? {
                Some(value) => {
                    results.push(value.clone());
                    let node = ast.node_mut(child);
                    node.kind = NodeKind::Computed(value);
                    node.children.clear();
                    kept.push(child);
                }
                None => {}
            }
        }

        ast.set_root_children(kept);
        Ok(results)
    }

    /// Process one node: expressions return their value, statements run
    /// for effect and return nothing.
    fn process(&mut self, ast: &Ast, id: NodeId) -> PyllowResult<Option<Value>> {
        let node = ast.node(id);
        if node.kind.is_expression() {
            return self.eval(ast, id).map(Some);
        }
        match &node.kind {
            NodeKind::Assign { id: name } => {
                let children = ast.children(id);
                let value = self.eval(ast, children[0])?;
                self.scopes.set(name, value);
                Ok(None)
            }
            NodeKind::If => {
                let children = ast.children(id);
                let condition = self.eval(ast, children[0])?;
                if condition.is_truthy() {
                    self.process_block(ast, children[1])?;
                } else if let Some(&alternative) = children.get(2) {
                    match ast.node(alternative).kind {
                        NodeKind::Block => self.process_block(ast, alternative)?,
                        _ => {
                            self.process(ast, alternative)?;
                        }
                    }
                }
                Ok(None)
            }
            NodeKind::Block => {
                self.process_block(ast, id)?;
                Ok(None)
            }
            // The root is handled by `execute`; nothing else reaches
            // here.
            _ => Ok(None),
        }
    }

    /// Run a block's statements inside a non-scope frame.
    fn process_block(&mut self, ast: &Ast, block: NodeId) -> PyllowResult<()> {
        self.scopes.push_frame(ast.node(block).kind.is_scope());
        for &statement in ast.children(block) {
            if let Err(err) = self.process(ast, statement) {
                self.scopes.pop_frame();
                return Err(err);
            }
        }
        self.scopes.pop_frame();
        Ok(())
    }

    /// Evaluate an expression node to a value.
    fn eval(&mut self, ast: &Ast, id: NodeId) -> PyllowResult<Value> {
        let node = ast.node(id);
        match &node.kind {
            NodeKind::Mono { kind, value } => match kind {
                MonoKind::Int => Value::int_from_lexeme(value, node.position.clone()),
                MonoKind::Float => Value::float_from_lexeme(value, node.position.clone()),
                MonoKind::Bool => Value::bool_from_lexeme(value, node.position.clone()),
                MonoKind::Id => self
                    .scopes
                    .get(value)
                    .cloned()
                    .ok_or_else(|| {
                        PyllowError::name(
                            format!("Name \"{value}\" is not defined"),
                            node.position.clone(),
                        )
                    }),
                MonoKind::Str => Err(PyllowError::type_error(
                    "String values are not implemented",
                    node.position.clone(),
                )),
            },
            NodeKind::Computed(value) => Ok(value.clone()),
            NodeKind::Binary(op) => self.eval_binary(ast, id, *op),
            NodeKind::Unary(op) => {
                let operand = self.eval(ast, ast.children(id)[0])?;
                Ok(match op {
                    UnaryOp::Not => operand.not(),
                    UnaryOp::Pos => operand.pos(),
                    UnaryOp::Neg => operand.neg(),
                })
            }
            NodeKind::Call { .. } => Err(PyllowError::type_error(
                "Call expressions are not implemented",
                node.position.clone(),
            )),
            other => Err(PyllowError::type_error(
                format!("{} is not an expression", other.name()),
                node.position.clone(),
            )),
        }
    }

    /// Evaluate a binary expression. `&` and `|` short-circuit with
    /// value-preserving semantics: `&` returns the first falsy operand
    /// without evaluating the second, `|` the first truthy one.
    fn eval_binary(&mut self, ast: &Ast, id: NodeId, op: BinaryOp) -> PyllowResult<Value> {
        let children = ast.children(id);
        let lhs = self.eval(ast, children[0])?;

        match op {
            BinaryOp::And => {
                if !lhs.is_truthy() {
                    return Ok(lhs);
                }
                return self.eval(ast, children[1]);
            }
            BinaryOp::Or => {
                if lhs.is_truthy() {
                    return Ok(lhs);
                }
                return self.eval(ast, children[1]);
            }
            _ => {}
        }

        let rhs = self.eval(ast, children[1])?;
        match op {
            BinaryOp::Add => Ok(lhs.add(&rhs)),
            BinaryOp::Sub => Ok(lhs.sub(&rhs)),
            BinaryOp::Mul => Ok(lhs.mul(&rhs)),
            BinaryOp::Div => lhs.div(&rhs),
            BinaryOp::Pow => Ok(lhs.pow(&rhs)),
            BinaryOp::Eq => Ok(lhs.equals(&rhs)),
            BinaryOp::Ne => Ok(lhs.not_equals(&rhs)),
            BinaryOp::Gt => Ok(lhs.greater_than(&rhs)),
            BinaryOp::Lt => Ok(lhs.less_than(&rhs)),
            BinaryOp::Ge => Ok(lhs.greater_equal(&rhs)),
            BinaryOp::Le => Ok(lhs.less_equal(&rhs)),
            BinaryOp::Dot => Err(PyllowError::type_error(
                format!(
                    "Unsupported operation \"{}\" on types: \"{}\" and \"{}\"",
                    op.symbol(),
                    lhs.kind(),
                    rhs.kind()
                ),
                ast.node(id).position.clone(),
            )),
            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyllow_lex::lex;
    use pyllow_par::parse;
    use pyllow_util::{ErrorKind, ValueKind};

    fn run(source: &str) -> (Interpreter, Vec<Value>) {
        let mut interpreter = Interpreter::new();
        let mut ast = parse(lex(source, "test")).expect("source should parse");
        let values = interpreter.execute(&mut ast).expect("source should execute");
        (interpreter, values)
    }

    fn run_err(source: &str) -> PyllowError {
        let mut interpreter = Interpreter::new();
        let mut ast = parse(lex(source, "test")).expect("source should parse");
        interpreter
            .execute(&mut ast)
            .expect_err("source should fail")
    }

    fn global(interpreter: &Interpreter, name: &str) -> Value {
        interpreter
            .globals()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| panic!("{name} not bound"))
    }

    // =========================================================================
    // EXPRESSION RESULTS
    // =========================================================================

    #[test]
    fn test_precedence_result() {
        let (_, values) = run("1 + 2 * 3");
        assert_eq!(values, vec![Value::int(7, pyllow_util::Position::dummy())]);
    }

    #[test]
    fn test_power_right_associative_result() {
        // 1 ^ 2 ^ 3 = 1 ^ (2 ^ 3) = 1
        let (_, values) = run("1 ^ 2 ^ 3");
        assert_eq!(values[0].payload(), 1.0);

        // Left association would give 64; right gives 512.
        let (_, values) = run("2 ^ 3 ^ 2");
        assert_eq!(values[0].payload(), 512.0);
    }

    #[test]
    fn test_paren_result() {
        let (_, values) = run("(1 + 2) * 3");
        assert_eq!(values[0].payload(), 9.0);
    }

    #[test]
    fn test_division_yields_float() {
        let (_, values) = run("5 / 2");
        assert_eq!(values[0].kind(), ValueKind::Float);
        assert_eq!(values[0].payload(), 2.5);
    }

    #[test]
    fn test_unary_results() {
        let (_, values) = run("-5");
        assert_eq!(values[0].payload(), -5.0);
        let (_, values) = run("!0");
        assert_eq!(values[0].payload(), 1.0);
        assert_eq!(values[0].kind(), ValueKind::Bool);
        let (_, values) = run("1 - - 2");
        assert_eq!(values[0].payload(), 3.0);
    }

    #[test]
    fn test_comparison_results() {
        let (_, values) = run("1 == 1");
        assert!(values[0].is_truthy());
        let (_, values) = run("1 != 1");
        assert!(!values[0].is_truthy());
        let (_, values) = run("2 > 1  1 >= 1  1 < 2  2 <= 1");
        assert!(values[0].is_truthy());
        assert!(values[1].is_truthy());
        assert!(values[2].is_truthy());
        assert!(!values[3].is_truthy());
    }

    // =========================================================================
    // SCOPE
    // =========================================================================

    #[test]
    fn test_assignment_binds_in_top_scope() {
        let (interpreter, values) = run("x = 5  y = x + 1");
        assert!(values.is_empty());
        assert_eq!(global(&interpreter, "x").payload(), 5.0);
        assert_eq!(global(&interpreter, "y").payload(), 6.0);
    }

    #[test]
    fn test_unbound_name_error() {
        let err = run_err("foo");
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.message, "Name \"foo\" is not defined");
    }

    #[test]
    fn test_name_error_position_points_at_use() {
        let err = run_err("x = 1\ny = missing");
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.position.line, 2);
    }

    #[test]
    fn test_scope_persists_across_runs() {
        let mut interpreter = Interpreter::new();
        let mut first = parse(lex("x = 5", "test")).expect("parses");
        interpreter.execute(&mut first).expect("executes");
        let mut second = parse(lex("y = x + 1", "test")).expect("parses");
        interpreter.execute(&mut second).expect("executes");
        assert_eq!(global(&interpreter, "y").payload(), 6.0);
    }

    // =========================================================================
    // IF / ELSE
    // =========================================================================

    #[test]
    fn test_if_taken_branch_binds_top_scope() {
        let (interpreter, _) = run("if 1 == 1 { a = 1 } else { a = 2 }");
        assert_eq!(global(&interpreter, "a").payload(), 1.0);
    }

    #[test]
    fn test_if_alternative_branch() {
        let (interpreter, _) = run("if 1 != 1 { a = 1 } else { a = 2 }");
        assert_eq!(global(&interpreter, "a").payload(), 2.0);
    }

    #[test]
    fn test_else_if_chain() {
        let (interpreter, _) = run("if 1 != 1 { a = 1 } else if 2 > 1 { a = 3 }");
        assert_eq!(global(&interpreter, "a").payload(), 3.0);
    }

    #[test]
    fn test_if_without_alternative_skips() {
        let (interpreter, _) = run("a = 0 if 1 != 1 { a = 1 }");
        assert_eq!(global(&interpreter, "a").payload(), 0.0);
    }

    #[test]
    fn test_nested_if() {
        let (interpreter, _) =
            run("if 1 == 1 { if 2 == 2 { a = 9 } }");
        assert_eq!(global(&interpreter, "a").payload(), 9.0);
    }

    #[test]
    fn test_condition_uses_bindings() {
        let (interpreter, _) = run("x = 5 if x > 3 { big = 1 } else { big = 0 }");
        assert_eq!(global(&interpreter, "big").payload(), 1.0);
    }

    // =========================================================================
    // SHORT-CIRCUIT LOGIC
    // =========================================================================

    #[test]
    fn test_and_returns_first_falsy() {
        let (_, values) = run("0 & 2");
        assert_eq!(values[0].payload(), 0.0);
        let (_, values) = run("1 & 2");
        assert_eq!(values[0].payload(), 2.0);
    }

    #[test]
    fn test_or_returns_first_truthy() {
        let (_, values) = run("1 | 2");
        assert_eq!(values[0].payload(), 1.0);
        let (_, values) = run("0 | 2");
        assert_eq!(values[0].payload(), 2.0);
    }

    #[test]
    fn test_and_short_circuits_rhs() {
        // The right operand would be a name error; `&` must not reach it.
        let (_, values) = run("0 & missing");
        assert_eq!(values[0].payload(), 0.0);
    }

    #[test]
    fn test_or_short_circuits_rhs() {
        let (_, values) = run("1 | missing");
        assert_eq!(values[0].payload(), 1.0);
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[test]
    fn test_zero_division() {
        let err = run_err("1 / 0");
        assert_eq!(err.kind, ErrorKind::ZeroDivision);
        assert_eq!(err.message, "Division by zero");
        assert_eq!(err.position.line, 1);
    }

    #[test]
    fn test_zero_division_behind_if_only_when_taken() {
        run("if 1 != 1 { x = 1 / 0 }");
        let err = run_err("if 1 == 1 { x = 1 / 0 }");
        assert_eq!(err.kind, ErrorKind::ZeroDivision);
    }

    #[test]
    fn test_call_not_implemented() {
        let err = run_err("foo(1)");
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "Call expressions are not implemented");
    }

    #[test]
    fn test_string_leaf_not_implemented() {
        let err = run_err("\"s\"");
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn test_dot_not_executable() {
        let err = run_err("1 . 2");
        assert_eq!(err.kind, ErrorKind::Type);
        assert!(err.message.contains("Unsupported operation"));
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    #[test]
    fn test_root_substitution() {
        let mut interpreter = Interpreter::new();
        let mut ast = parse(lex("x = 1  2 + 3", "test")).expect("parses");
        assert_eq!(ast.children(ast.root()).len(), 2);
        let values = interpreter.execute(&mut ast).expect("executes");
        assert_eq!(values.len(), 1);
        // The assignment was removed; the expression became its result.
        let remaining = ast.children(ast.root());
        assert_eq!(remaining.len(), 1);
        match &ast.node(remaining[0]).kind {
            NodeKind::Computed(value) => assert_eq!(value.payload(), 5.0),
            other => panic!("expected Computed, got {other:?}"),
        }
    }

    #[test]
    fn test_reexecution_is_stable() {
        let mut interpreter = Interpreter::new();
        let mut ast = parse(lex("x = 1  2 + 3", "test")).expect("parses");
        interpreter.execute(&mut ast).expect("first run");
        let values = interpreter.execute(&mut ast).expect("second run");
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].payload(), 5.0);
    }

    #[test]
    fn test_mixed_variant_arithmetic() {
        let (_, values) = run("1 + 2.5");
        assert_eq!(values[0].kind(), ValueKind::Int);
        assert_eq!(values[0].payload(), 3.0);
        let (_, values) = run("2.5 + 1");
        assert_eq!(values[0].kind(), ValueKind::Float);
        assert_eq!(values[0].payload(), 3.5);
    }

    #[test]
    fn test_bool_arithmetic() {
        let (_, values) = run("true + true");
        assert_eq!(values[0].kind(), ValueKind::Bool);
        assert_eq!(values[0].payload(), 1.0);
        let (_, values) = run("true == 1");
        assert!(values[0].is_truthy());
    }
}
