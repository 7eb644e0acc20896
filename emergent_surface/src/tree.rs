// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural and focus queries the host exposes over its element tree.

use alloc::vec::Vec;

bitflags::bitflags! {
    /// Per-element state flags relevant to focus and dismissal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element carries an explicit hidden attribute/flag.
        const HIDDEN   = 0b0000_0001;
        /// Element is disabled and must not receive focus.
        const DISABLED = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Broad element classification consulted by focus traversal.
///
/// Only the distinctions that change overlay behavior are modeled: links are
/// excluded from auto-focus candidates, text-entry elements get their content
/// selected on focus, and hidden inputs never participate in focus at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Any ordinary element.
    #[default]
    Generic,
    /// A link/anchor element.
    Link,
    /// A text-entry element whose content can be selected.
    TextEntry,
    /// A hidden input; present in the tree but never focusable.
    HiddenInput,
}

/// Per-element information yielded by [`SurfaceTree::info`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementInfo {
    /// Element classification.
    pub kind: ElementKind,
    /// Hidden/disabled state flags.
    pub flags: ElementFlags,
    /// Explicit focus-order value, when the element declares one.
    ///
    /// `None` and negative values both exclude the element from sequential
    /// (Tab) traversal; programmatic focus may still target it.
    pub tab_index: Option<i32>,
}

/// Read-only structural view of the host's element tree.
///
/// Implementations are queried at event time and should reflect the tree as
/// it currently stands; the overlay controllers never cache structure across
/// turns. All queries must tolerate stale handles (an element that has been
/// removed) by reporting it as absent rather than panicking.
pub trait SurfaceTree<K> {
    /// Returns `true` when `node` is `root` or lies inside `root`'s subtree.
    fn contains(&self, root: K, node: K) -> bool;

    /// Depth-first (document order) traversal of `root`'s subtree,
    /// excluding `root` itself.
    fn descendants(&self, root: K) -> Vec<K>;

    /// Per-element focus-relevant information.
    fn info(&self, node: K) -> ElementInfo;

    /// Parent of `node`, or `None` at the root (or for a detached node).
    fn parent(&self, node: K) -> Option<K>;

    /// Whether the element's computed display removes it from layout.
    fn is_display_none(&self, node: K) -> bool;

    /// Whether the element's computed visibility hides it.
    fn is_visibility_hidden(&self, node: K) -> bool;

    /// Whether the handle still refers to an element attached to the tree.
    fn is_attached(&self, node: K) -> bool;
}

/// Options for a focus move requested through [`FocusEnvironment::focus`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusOptions {
    /// Select the element's text content after focusing, when applicable.
    pub select: bool,
    /// Suppress any scroll-into-view behavior the host would normally apply.
    pub prevent_scroll: bool,
}

/// The host's focus machinery.
///
/// Focus moves are requests: an element may refuse focus (hidden, disabled,
/// or simply not focusable in the host), in which case the active element is
/// unchanged. Callers that need to know whether focus actually moved compare
/// [`FocusEnvironment::active_element`] before and after.
pub trait FocusEnvironment<K> {
    /// The element currently holding focus, or `None` when focus rests on
    /// the document root/body.
    fn active_element(&self) -> Option<K>;

    /// Requests that focus move to `node`.
    fn focus(&mut self, node: K, options: FocusOptions);

    /// Returns focus to the document root/body.
    fn focus_root(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_info_default_is_unfocusable_generic() {
        let info = ElementInfo::default();
        assert_eq!(info.kind, ElementKind::Generic);
        assert!(info.flags.is_empty());
        assert_eq!(info.tab_index, None);
    }

    #[test]
    fn flags_compose() {
        let flags = ElementFlags::HIDDEN | ElementFlags::DISABLED;
        assert!(flags.contains(ElementFlags::HIDDEN));
        assert!(flags.contains(ElementFlags::DISABLED));
    }
}
