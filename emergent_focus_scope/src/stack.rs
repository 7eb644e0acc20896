// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Identity of one focus scope within a [`ScopeStack`].
///
/// Allocated by [`ScopeStack::allocate`]; stable for the scope's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

#[derive(Debug)]
struct ScopeEntry {
    id: ScopeId,
    paused: bool,
}

/// Shared registry of active focus scopes.
///
/// At most one scope is live at a time: adding a scope pauses the previous
/// head, removing the head resumes the one beneath it. A paused scope keeps
/// its place in the stack but stops containing focus until it is resumed.
///
/// Like the layer registry, this is a plain owned value the host threads
/// `&mut` into scope operations; one stack per element-tree root.
///
/// # Example
///
/// ```
/// use emergent_focus_scope::ScopeStack;
///
/// let mut stack = ScopeStack::new();
/// let outer = stack.allocate();
/// let inner = stack.allocate();
///
/// stack.add(outer);
/// stack.add(inner);
/// assert!(stack.is_paused(outer));
///
/// stack.remove(inner);
/// assert!(!stack.is_paused(outer));
/// ```
#[derive(Debug, Default)]
pub struct ScopeStack {
    entries: Vec<ScopeEntry>,
    next: u64,
}

impl ScopeStack {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }

    /// Allocates a fresh scope identity. The scope is not yet active.
    pub fn allocate(&mut self) -> ScopeId {
        let id = ScopeId(self.next);
        self.next += 1;
        id
    }

    /// Activates a scope, pausing the previous head.
    ///
    /// A scope already in the stack is moved to the head rather than
    /// duplicated.
    pub fn add(&mut self, id: ScopeId) {
        if let Some(head) = self.entries.last_mut() {
            head.paused = true;
        }
        self.entries.retain(|entry| entry.id != id);
        self.entries.push(ScopeEntry { id, paused: false });
    }

    /// Deactivates a scope and resumes the new head, if any.
    pub fn remove(&mut self, id: ScopeId) {
        self.entries.retain(|entry| entry.id != id);
        if let Some(head) = self.entries.last_mut() {
            head.paused = false;
        }
    }

    /// The currently live scope.
    #[must_use]
    pub fn head(&self) -> Option<ScopeId> {
        self.entries.last().map(|entry| entry.id)
    }

    /// Whether `id` is in the stack but paused. Absent scopes report `false`.
    #[must_use]
    pub fn is_paused(&self, id: ScopeId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.id == id && entry.paused)
    }

    /// Pauses a scope without removing it.
    pub fn pause(&mut self, id: ScopeId) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.paused = true;
        }
    }

    /// Resumes a paused scope.
    pub fn resume(&mut self, id: ScopeId) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.paused = false;
        }
    }

    /// Whether `id` is in the stack, paused or not.
    #[must_use]
    pub fn contains(&self, id: ScopeId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Number of active scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no scope is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_pauses_the_previous_head() {
        let mut stack = ScopeStack::new();
        let a = stack.allocate();
        let b = stack.allocate();

        stack.add(a);
        assert_eq!(stack.head(), Some(a));
        assert!(!stack.is_paused(a));

        stack.add(b);
        assert_eq!(stack.head(), Some(b));
        assert!(stack.is_paused(a));
        assert!(!stack.is_paused(b));
    }

    #[test]
    fn removing_the_head_resumes_the_one_beneath() {
        let mut stack = ScopeStack::new();
        let a = stack.allocate();
        let b = stack.allocate();
        stack.add(a);
        stack.add(b);

        stack.remove(b);
        assert_eq!(stack.head(), Some(a));
        assert!(!stack.is_paused(a));

        stack.remove(a);
        assert!(stack.is_empty());
    }

    #[test]
    fn removing_a_buried_scope_keeps_the_head_live() {
        let mut stack = ScopeStack::new();
        let a = stack.allocate();
        let b = stack.allocate();
        let c = stack.allocate();
        stack.add(a);
        stack.add(b);
        stack.add(c);

        stack.remove(a);
        assert_eq!(stack.head(), Some(c));
        assert!(stack.is_paused(b));
        assert!(!stack.is_paused(c));
    }

    #[test]
    fn re_adding_moves_to_the_head() {
        let mut stack = ScopeStack::new();
        let a = stack.allocate();
        let b = stack.allocate();
        stack.add(a);
        stack.add(b);

        stack.add(a);
        assert_eq!(stack.head(), Some(a));
        assert_eq!(stack.len(), 2);
        assert!(stack.is_paused(b));
    }

    #[test]
    fn absent_scope_is_not_paused() {
        let mut stack = ScopeStack::new();
        let a = stack.allocate();
        assert!(!stack.is_paused(a));
        assert!(!stack.contains(a));
    }
}
