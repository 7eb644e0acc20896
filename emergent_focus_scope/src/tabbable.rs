// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus-candidate collection over a container subtree.
//!
//! Candidacy here is structural: an element qualifies when it declares a
//! non-negative focus-order value and is not disabled, attribute-hidden, or a
//! hidden input. Whether it is actually reachable right now is a separate,
//! computed-style question answered by [`is_hidden`], checked lazily because
//! style resolution is the expensive part.

use alloc::vec::Vec;
use emergent_surface::{ElementFlags, ElementKind, SurfaceTree};

/// Collects focus candidates inside `container`, in document order.
///
/// The container itself is never a candidate.
pub fn focus_candidates<K, T>(tree: &T, container: K) -> Vec<K>
where
    K: Copy,
    T: SurfaceTree<K> + ?Sized,
{
    tree.descendants(container)
        .into_iter()
        .filter(|&node| {
            let info = tree.info(node);
            if info.flags.contains(ElementFlags::DISABLED)
                || info.flags.contains(ElementFlags::HIDDEN)
                || info.kind == ElementKind::HiddenInput
            {
                return false;
            }
            info.tab_index.is_some_and(|index| index >= 0)
        })
        .collect()
}

/// Drops link elements from a candidate list.
///
/// Auto-focus skips links: focusing one on open makes an accidental Enter
/// navigate away from the page the overlay sits on.
pub fn remove_links<K, T>(tree: &T, candidates: Vec<K>) -> Vec<K>
where
    K: Copy,
    T: SurfaceTree<K> + ?Sized,
{
    candidates
        .into_iter()
        .filter(|&node| tree.info(node).kind != ElementKind::Link)
        .collect()
}

/// Whether `element` is hidden by computed style.
///
/// `visibility: hidden` on the element itself hides it; `display: none`
/// anywhere on the ancestor chain hides it too. The walk stops at `up_to`
/// (exclusive): an overlay being animated out should not hide its own
/// contents from edge computation.
pub fn is_hidden<K, T>(tree: &T, element: K, up_to: Option<K>) -> bool
where
    K: Copy + Eq,
    T: SurfaceTree<K> + ?Sized,
{
    if tree.is_visibility_hidden(element) {
        return true;
    }
    let mut current = Some(element);
    while let Some(node) = current {
        if up_to == Some(node) {
            return false;
        }
        if tree.is_display_none(node) {
            return true;
        }
        current = tree.parent(node);
    }
    false
}

/// First candidate that is visible under [`is_hidden`].
pub fn first_visible<K, T>(tree: &T, candidates: &[K], up_to: Option<K>) -> Option<K>
where
    K: Copy + Eq,
    T: SurfaceTree<K> + ?Sized,
{
    candidates
        .iter()
        .copied()
        .find(|&node| !is_hidden(tree, node, up_to))
}

/// First and last visible focus candidates inside `container`.
pub fn tabbable_edges<K, T>(tree: &T, container: K) -> (Option<K>, Option<K>)
where
    K: Copy + Eq,
    T: SurfaceTree<K> + ?Sized,
{
    let candidates = focus_candidates(tree, container);
    let first = first_visible(tree, &candidates, Some(container));
    let last = candidates
        .iter()
        .rev()
        .copied()
        .find(|&node| !is_hidden(tree, node, Some(container)));
    (first, last)
}
