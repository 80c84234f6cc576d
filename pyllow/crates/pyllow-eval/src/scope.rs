//! Scope stack for name resolution.
//!
//! Frames are pushed as evaluation enters nodes and popped on the way
//! out; each frame carries the node's is-scope bit. Reads walk from the
//! innermost frame toward the root and stop at the first hit; writes
//! land in the innermost frame whose is-scope bit is true, so a binding
//! made inside an `if` block (not a scope owner) lands in the enclosing
//! scope. The root frame persists for the lifetime of the interpreter.
//!
//! Bindings use an insertion-ordered map so shell listings come out in
//! definition order.

use indexmap::IndexMap;
use pyllow_util::Value;

/// One frame of the stack.
#[derive(Debug, Default)]
struct Frame {
    bindings: IndexMap<String, Value>,
    is_scope: bool,
}

/// A stack of binding frames rooted in the persistent global frame.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// Create a stack holding the global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                bindings: IndexMap::new(),
                is_scope: true,
            }],
        }
    }

    /// Enter a frame; `is_scope` is the owning node's is-scope bit.
    pub fn push_frame(&mut self, is_scope: bool) {
        self.frames.push(Frame {
            bindings: IndexMap::new(),
            is_scope,
        });
    }

    /// Leave the innermost frame. The global frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Walk the chain innermost-first and return the first binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
    }

    /// Bind `name` in the innermost is-scope frame.
    pub fn set(&mut self, name: &str, value: Value) {
        for frame in self.frames.iter_mut().rev() {
            if frame.is_scope {
                frame.bindings.insert(name.to_string(), value);
                return;
            }
        }
    }

    /// The global bindings in insertion order.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.frames[0]
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Current frame depth, the global frame included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
