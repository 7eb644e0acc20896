// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference in-memory surface for tests and demos.
//!
//! [`MockSurface`] implements both [`SurfaceTree`] and [`FocusEnvironment`]
//! over plain `u32` element ids. It models just enough host behavior for the
//! overlay controllers to be exercised realistically:
//!
//! - elements refuse focus when hidden, disabled, display-none, or marked
//!   [`MockSurface::set_refuses_focus`], leaving the active element unchanged;
//! - removing an element detaches its whole subtree, and focus falls back to
//!   the root when the active element is removed;
//! - text selection is recorded so tests can assert on select-on-focus.
//!
//! ```
//! use emergent_surface::mock::MockSurface;
//! use emergent_surface::{ElementKind, FocusEnvironment, FocusOptions, SurfaceTree};
//!
//! let mut surface = MockSurface::new();
//! surface.insert(1, None);
//! surface.insert(2, Some(1));
//! surface.set_kind(2, ElementKind::TextEntry);
//! surface.set_tab_index(2, 0);
//!
//! assert!(surface.contains(1, 2));
//! surface.focus(2, FocusOptions { select: true, prevent_scroll: true });
//! assert_eq!(surface.active_element(), Some(2));
//! assert_eq!(surface.last_selected(), Some(2));
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::tree::{
    ElementFlags, ElementInfo, ElementKind, FocusEnvironment, FocusOptions, SurfaceTree,
};

#[derive(Clone, Debug, Default)]
struct Node {
    parent: Option<u32>,
    children: Vec<u32>,
    info: ElementInfo,
    display_none: bool,
    visibility_hidden: bool,
    refuses_focus: bool,
}

/// In-memory element tree plus focus environment over `u32` ids.
#[derive(Clone, Debug, Default)]
pub struct MockSurface {
    nodes: HashMap<u32, Node>,
    roots: Vec<u32>,
    active: Option<u32>,
    last_selected: Option<u32>,
}

impl MockSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element under `parent`, or as a root when `parent` is
    /// `None`. Ids must be unique.
    pub fn insert(&mut self, id: u32, parent: Option<u32>) {
        assert!(
            !self.nodes.contains_key(&id),
            "element id already present in the mock surface"
        );
        self.nodes.insert(
            id,
            Node {
                parent,
                ..Node::default()
            },
        );
        match parent {
            Some(p) => {
                let parent_node = self
                    .nodes
                    .get_mut(&p)
                    .expect("parent must be inserted first");
                parent_node.children.push(id);
            }
            None => self.roots.push(id),
        }
    }

    /// Sets the element's classification.
    pub fn set_kind(&mut self, id: u32, kind: ElementKind) {
        self.node_mut(id).info.kind = kind;
    }

    /// Sets the element's explicit focus-order value.
    pub fn set_tab_index(&mut self, id: u32, tab_index: i32) {
        self.node_mut(id).info.tab_index = Some(tab_index);
    }

    /// Sets the element's hidden/disabled flags.
    pub fn set_flags(&mut self, id: u32, flags: ElementFlags) {
        self.node_mut(id).info.flags = flags;
    }

    /// Marks the element's computed display as none (or not).
    pub fn set_display_none(&mut self, id: u32, display_none: bool) {
        self.node_mut(id).display_none = display_none;
    }

    /// Marks the element's computed visibility as hidden (or not).
    pub fn set_visibility_hidden(&mut self, id: u32, hidden: bool) {
        self.node_mut(id).visibility_hidden = hidden;
    }

    /// Makes the element refuse focus requests without being hidden or
    /// disabled.
    pub fn set_refuses_focus(&mut self, id: u32, refuses: bool) {
        self.node_mut(id).refuses_focus = refuses;
    }

    /// Removes an element and its entire subtree.
    ///
    /// When the active element is inside the removed subtree, focus falls
    /// back to the root, matching hosts that blur to the body on removal.
    /// Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: u32) {
        if !self.nodes.contains_key(&id) {
            return;
        }
        let mut doomed = Vec::new();
        self.collect_subtree(id, &mut doomed);
        if let Some(parent) = self.nodes[&id].parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        } else {
            self.roots.retain(|&r| r != id);
        }
        for node in doomed {
            self.nodes.remove(&node);
            if self.active == Some(node) {
                self.active = None;
            }
        }
    }

    /// The element whose text content was selected most recently, if any.
    #[must_use]
    pub fn last_selected(&self) -> Option<u32> {
        self.last_selected
    }

    fn node_mut(&mut self, id: u32) -> &mut Node {
        self.nodes.get_mut(&id).expect("unknown element id")
    }

    fn collect_subtree(&self, id: u32, out: &mut Vec<u32>) {
        out.push(id);
        if let Some(node) = self.nodes.get(&id) {
            for &child in &node.children {
                self.collect_subtree(child, out);
            }
        }
    }

    fn accepts_focus(&self, id: u32) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        !(node.refuses_focus
            || node.display_none
            || node.info.flags.contains(ElementFlags::HIDDEN)
            || node.info.flags.contains(ElementFlags::DISABLED))
    }
}

impl SurfaceTree<u32> for MockSurface {
    fn contains(&self, root: u32, node: u32) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn descendants(&self, root: u32) -> Vec<u32> {
        let mut out = Vec::new();
        if let Some(node) = self.nodes.get(&root) {
            for &child in &node.children {
                self.collect_subtree(child, &mut out);
            }
        }
        out
    }

    fn info(&self, node: u32) -> ElementInfo {
        self.nodes.get(&node).map(|n| n.info).unwrap_or_default()
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn is_display_none(&self, node: u32) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.display_none)
    }

    fn is_visibility_hidden(&self, node: u32) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.visibility_hidden)
    }

    fn is_attached(&self, node: u32) -> bool {
        self.nodes.contains_key(&node)
    }
}

impl FocusEnvironment<u32> for MockSurface {
    fn active_element(&self) -> Option<u32> {
        self.active
    }

    fn focus(&mut self, node: u32, options: FocusOptions) {
        if !self.accepts_focus(node) {
            return;
        }
        let previous = self.active;
        self.active = Some(node);
        if options.select
            && previous != Some(node)
            && self.nodes[&node].info.kind == ElementKind::TextEntry
        {
            self.last_selected = Some(node);
        }
    }

    fn focus_root(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn select() -> FocusOptions {
        FocusOptions {
            select: true,
            prevent_scroll: true,
        }
    }

    #[test]
    fn containment_walks_ancestors() {
        let mut surface = MockSurface::new();
        surface.insert(1, None);
        surface.insert(2, Some(1));
        surface.insert(3, Some(2));
        surface.insert(4, None);

        assert!(surface.contains(1, 1));
        assert!(surface.contains(1, 3));
        assert!(!surface.contains(2, 1));
        assert!(!surface.contains(1, 4));
    }

    #[test]
    fn descendants_are_depth_first() {
        let mut surface = MockSurface::new();
        surface.insert(1, None);
        surface.insert(2, Some(1));
        surface.insert(3, Some(2));
        surface.insert(4, Some(1));

        assert_eq!(surface.descendants(1), vec![2, 3, 4]);
    }

    #[test]
    fn disabled_elements_refuse_focus() {
        let mut surface = MockSurface::new();
        surface.insert(1, None);
        surface.set_flags(1, ElementFlags::DISABLED);

        surface.focus(1, select());
        assert_eq!(surface.active_element(), None);
    }

    #[test]
    fn selection_only_for_text_entry() {
        let mut surface = MockSurface::new();
        surface.insert(1, None);
        surface.insert(2, None);
        surface.set_kind(2, ElementKind::TextEntry);

        surface.focus(1, select());
        assert_eq!(surface.last_selected(), None);

        surface.focus(2, select());
        assert_eq!(surface.last_selected(), Some(2));
    }

    #[test]
    fn removing_active_subtree_blurs_to_root() {
        let mut surface = MockSurface::new();
        surface.insert(1, None);
        surface.insert(2, Some(1));
        surface.focus(2, FocusOptions::default());
        assert_eq!(surface.active_element(), Some(2));

        surface.remove(1);
        assert_eq!(surface.active_element(), None);
        assert!(!surface.is_attached(2));
    }
}
