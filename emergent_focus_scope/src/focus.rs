// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus-move helpers shared by the scope controller.

use emergent_surface::{ElementKind, FocusEnvironment, FocusOptions, SurfaceTree};

/// Requests focus on `element`, selecting text content when asked.
///
/// Selection only applies to text-entry elements; scroll-into-view is always
/// suppressed so an overlay opening never jolts the page. Whether focus
/// actually moved is for the caller to observe via
/// [`FocusEnvironment::active_element`].
pub fn focus<K, T, E>(tree: &T, env: &mut E, element: K, select: bool)
where
    K: Copy,
    T: SurfaceTree<K> + ?Sized,
    E: FocusEnvironment<K> + ?Sized,
{
    let select = select && tree.info(element).kind == ElementKind::TextEntry;
    env.focus(
        element,
        FocusOptions {
            select,
            prevent_scroll: true,
        },
    );
}

/// [`focus`], tolerating an absent target.
pub fn focus_optional<K, T, E>(tree: &T, env: &mut E, element: Option<K>, select: bool)
where
    K: Copy,
    T: SurfaceTree<K> + ?Sized,
    E: FocusEnvironment<K> + ?Sized,
{
    if let Some(element) = element {
        focus(tree, env, element, select);
    }
}

/// Tries each candidate in order until one accepts focus.
///
/// Returns whether the active element changed. Acceptance is detected by
/// comparing the active element across the request, so refusals (hidden or
/// otherwise unfocusable elements) simply fall through to the next
/// candidate.
pub fn focus_first<K, T, E>(tree: &T, env: &mut E, candidates: &[K], select: bool) -> bool
where
    K: Copy + Eq,
    T: SurfaceTree<K> + ?Sized,
    E: FocusEnvironment<K> + ?Sized,
{
    let previously = env.active_element();
    for &candidate in candidates {
        focus(tree, env, candidate, select);
        if env.active_element() != previously {
            return true;
        }
    }
    false
}
