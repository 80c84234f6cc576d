//! Arena-allocated abstract syntax tree.
//!
//! Nodes live in one vector and reference each other by [`NodeId`];
//! parent back-references are plain indices set by a post-parse fix-up
//! pass, so the tree stays a DAG with no cyclic ownership.
//!
//! Two per-variant constants govern the tree's behavior:
//!
//! - *is-scope*: whether the node owns a variable-binding frame. Only
//!   the root does today; blocks deliberately do not, so statements
//!   inside an `if` bind in the enclosing scope.
//! - *is-parent*: whether nodes attached to this node become its
//!   children structurally, or bubble up to its own parent. Blocks
//!   forward; everything else is a real parent.

use pyllow_util::{Position, Value};
use std::fmt;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The raw index value.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Binary operator variants, one per symbol in the character table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Eq,
    Ne,
    And,
    Or,
    Gt,
    Lt,
    Ge,
    Le,
    /// Reserved: parses at the highest precedence, never executes.
    Dot,
}

impl BinaryOp {
    /// The constructor for an operator symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "^" => Some(BinaryOp::Pow),
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::Ne),
            "&" => Some(BinaryOp::And),
            "|" => Some(BinaryOp::Or),
            ">" => Some(BinaryOp::Gt),
            "<" => Some(BinaryOp::Lt),
            ">=" => Some(BinaryOp::Ge),
            "<=" => Some(BinaryOp::Le),
            "." => Some(BinaryOp::Dot),
            _ => None,
        }
    }

    /// The surface symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Dot => ".",
        }
    }
}

/// Unary operator variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// Unary `+`
    Pos,
    /// Unary `-`
    Neg,
}

impl UnaryOp {
    /// The constructor for an operator symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "!" => Some(UnaryOp::Not),
            "+" => Some(UnaryOp::Pos),
            "-" => Some(UnaryOp::Neg),
            _ => None,
        }
    }
}

/// The literal/identifier kind of a leaf expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonoKind {
    Int,
    Float,
    Bool,
    /// Reserved: strings lex and parse but do not evaluate.
    Str,
    Id,
}

/// Tagged node variants.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The root of the tree.
    Top,
    /// The body of an `if`/`else` branch.
    Block,
    /// A leaf bearing a literal or identifier lexeme.
    Mono { kind: MonoKind, value: String },
    /// `lhs op rhs`; children are exactly `[lhs, rhs]`.
    Binary(BinaryOp),
    /// Prefix operator; exactly one child.
    Unary(UnaryOp),
    /// `id(args...)`; parsed but never evaluated.
    Call { id: String },
    /// `id = expr`; the single child is the value expression.
    Assign { id: String },
    /// Children are `[condition, block]` or `[condition, block, alt]`
    /// where `alt` is another `If` or a `Block`.
    If,
    /// A value substituted into the root's child list after execution.
    Computed(Value),
}

impl NodeKind {
    /// Whether this variant owns a variable-binding frame.
    pub fn is_scope(&self) -> bool {
        matches!(self, NodeKind::Top)
    }

    /// Whether nodes attached to this variant become its children, or
    /// bubble up to its own parent.
    pub fn is_parent(&self) -> bool {
        !matches!(self, NodeKind::Block)
    }

    /// Display name used by the tree dump.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Top => "Top",
            NodeKind::Block => "Block",
            NodeKind::Mono { .. } => "Mono",
            NodeKind::Binary(_) => "Binary",
            NodeKind::Unary(_) => "Unary",
            NodeKind::Call { .. } => "Call",
            NodeKind::Assign { .. } => "Assign",
            NodeKind::If => "If",
            NodeKind::Computed(_) => "Computed",
        }
    }

    /// True for variants that evaluate to a value.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Mono { .. }
                | NodeKind::Binary(_)
                | NodeKind::Unary(_)
                | NodeKind::Call { .. }
                | NodeKind::Computed(_)
        )
    }
}

/// One node of the tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// Variant tag and payload.
    pub kind: NodeKind,
    /// Structural parent, fixed after parse; absent on the root.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// Source position.
    pub position: Position,
}

/// The tree: an arena of nodes plus the root index.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Top,
            parent: None,
            children: Vec::new(),
            position: Position::dummy(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a node and return its id.
    pub fn push(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            position,
        });
        id
    }

    /// Append `child` to `parent`'s child list. Parent back-references
    /// are not touched here; [`Ast::set_parents`] fixes them in one
    /// pass.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// The children of `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Replace the root's child list (execution removes statements and
    /// substitutes computed results).
    pub fn set_root_children(&mut self, children: Vec<NodeId>) {
        self.nodes[self.root.index()].children = children;
    }

    /// Number of allocated nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Fix every node's parent per the is-parent flag: children of a
    /// forwarding node (a block) point at that node's own parent, so
    /// their scope walk skips straight to the enclosing scope owner.
    /// The root's parent stays absent.
    pub fn set_parents(&mut self) {
        self.nodes[self.root.index()].parent = None;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            let effective = if node.kind.is_parent() {
                Some(id)
            } else {
                node.parent
            };
            let children = node.children.clone();
            for child in children {
                self.nodes[child.index()].parent = effective;
                stack.push(child);
            }
        }
    }

    /// Structural comparison with another tree rooted at `b`, ignoring
    /// positions. Used by tests (e.g. the paren round-trip property).
    pub fn same_shape(&self, a: NodeId, other: &Ast, b: NodeId) -> bool {
        let na = self.node(a);
        let nb = other.node(b);
        if na.kind != nb.kind || na.children.len() != nb.children.len() {
            return false;
        }
        na.children
            .iter()
            .zip(nb.children.iter())
            .all(|(&ca, &cb)| self.same_shape(ca, other, cb))
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let indent = "  ".repeat(depth);
        let label = match &node.kind {
            NodeKind::Mono { kind, value } => format!("Mono({kind:?} {value})"),
            NodeKind::Binary(op) => format!("Binary({})", op.symbol()),
            NodeKind::Unary(op) => format!("Unary({op:?})"),
            NodeKind::Call { id } => format!("Call({id})"),
            NodeKind::Assign { id } => format!("Assign({id})"),
            NodeKind::Computed(value) => format!("Computed({value})"),
            other => other.name().to_string(),
        };
        out.push_str(&format!("{indent}{label}\n"));
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }

    /// Indented dump of the whole tree.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dump())
    }
}
