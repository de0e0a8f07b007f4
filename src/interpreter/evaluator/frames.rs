//! Call frames and the frame chain.
//!
//! The chain is DYNAMIC: a frame's parent is the frame of whoever made the
//! call, not the scope the callee was declared in. Free names that a routine
//! does not bind locally therefore fall back to its caller's bindings. When
//! every routine is called from its lexically enclosing block, this matches
//! the lexical resolution the static analyzer uses; the two diverge when a
//! routine is called from a sibling. The dynamic chain is intentional, not
//! an accident of implementation; see DESIGN.md for the trade-off against
//! lexical frame linkage.

use std::collections::{BTreeMap, HashMap};

use crate::interpreter::value::Value;

/// One runtime frame: a mapping from canonical variable name to its current
/// value, where `None` means declared-but-unset.
///
/// Only names pre-declared in the frame (from the callee's scope) can ever
/// be bound in it; the frame chain refuses writes to anything else.
#[derive(Debug, Default)]
pub struct CallFrame {
    values: HashMap<String, Option<Value>>,
}

impl CallFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a name in this frame, initially unset. Re-declaring an
    /// existing name resets it to unset.
    pub fn declare(&mut self, name: &str) {
        self.values.insert(name.to_string(), None);
    }

    /// Binds a declared name directly in this frame, declaring it first if
    /// necessary (used for parameter binding, where the callee's scope has
    /// already declared every parameter).
    pub fn bind(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), Some(value));
    }

    /// Whether this frame declares the name (set or not).
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value bound to the name in this frame, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied().flatten()
    }

    /// The frame's set bindings, sorted by name. Unset declarations are
    /// omitted, matching the observable output of the original system.
    #[must_use]
    pub fn bindings(&self) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .filter_map(|(name, value)| value.map(|v| (name.clone(), v)))
            .collect()
    }
}

/// The runtime frame chain.
///
/// Pushed on every program entry and routine call, popped on return; name
/// resolution walks from the innermost frame outward.
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a frame onto the chain.
    pub fn push(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    /// Pops the innermost frame, if any.
    pub fn pop(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    /// Reads a name, walking the chain outward.
    ///
    /// A frame that declares the name but has not set it is skipped and the
    /// search continues outward; `None` means the name is unset in every
    /// frame that declares it (or declared nowhere, which
    /// [`Self::declares`] distinguishes).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Whether any frame in the chain declares the name.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.declares(name))
    }

    /// Writes a name into the innermost frame that declares it.
    ///
    /// Returns `false` when no frame in the chain declares the name; the
    /// caller treats that as an invariant violation, since analysis only
    /// admits writes to declared names.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        for frame in self.frames.iter_mut().rev() {
            if frame.declares(name) {
                frame.bind(name, value);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_stores_a_value_for_a_declared_name() {
        let mut stack = CallStack::new();
        let mut frame = CallFrame::new();
        frame.declare("KEY");
        stack.push(frame);

        assert!(stack.set("KEY", Value::Integer(123)));
        assert_eq!(stack.lookup("KEY"), Some(Value::Integer(123)));
    }

    #[test]
    fn set_fails_for_an_undeclared_name() {
        let mut stack = CallStack::new();
        stack.push(CallFrame::new());

        assert!(!stack.set("KEY", Value::Integer(123)));
    }

    #[test]
    fn set_reaches_a_name_declared_in_a_parent_frame() {
        let mut stack = CallStack::new();
        let mut parent = CallFrame::new();
        parent.declare("KEY");
        stack.push(parent);
        stack.push(CallFrame::new());

        assert!(stack.set("KEY", Value::Integer(123)));

        stack.pop();
        assert_eq!(stack.lookup("KEY"), Some(Value::Integer(123)));
    }

    #[test]
    fn inner_declaration_shadows_outer_writes() {
        let mut stack = CallStack::new();
        let mut outer = CallFrame::new();
        outer.declare("X");
        outer.bind("X", Value::Integer(3));
        stack.push(outer);

        let mut inner = CallFrame::new();
        inner.declare("X");
        stack.push(inner);

        assert!(stack.set("X", Value::Integer(5)));
        stack.pop();
        assert_eq!(stack.lookup("X"), Some(Value::Integer(3)));
    }

    #[test]
    fn unset_inner_declaration_falls_through_on_read() {
        let mut stack = CallStack::new();
        let mut outer = CallFrame::new();
        outer.bind("X", Value::Integer(7));
        stack.push(outer);

        let mut inner = CallFrame::new();
        inner.declare("X");
        stack.push(inner);

        assert_eq!(stack.lookup("X"), Some(Value::Integer(7)));
    }

    #[test]
    fn bindings_omit_unset_declarations() {
        let mut frame = CallFrame::new();
        frame.declare("UNSET");
        frame.bind("SET", Value::Bool(true));

        let bindings = frame.bindings();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings["SET"], Value::Bool(true));
    }
}
