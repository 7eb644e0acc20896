// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use emergent_surface::dispatch::Cancelable;
use emergent_surface::event::{FocusIn, FocusOut, Key, KeyDown, Modifiers};
use emergent_surface::{FocusEnvironment, SurfaceTree};

use crate::focus::{focus, focus_first, focus_optional};
use crate::stack::{ScopeId, ScopeStack};
use crate::tabbable::{focus_candidates, remove_links, tabbable_edges};

/// Per-scope configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusScopeOptions {
    /// Contain focus: while active and unpaused, focus that lands or is
    /// headed outside the region is pulled back in.
    pub trapped: bool,
    /// Wrap sequential (Tab) traversal at the region's tabbable edges.
    pub wrap: bool,
}

/// Detail payload for the auto-focus notifications.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AutoFocus<K> {
    /// The scope's region root.
    pub container: K,
}

/// Consumer callbacks for a [`FocusScope`].
///
/// Both notifications are cancelable and discrete: they run synchronously
/// inside [`FocusScope::activate`] / [`FocusScope::deactivate`], and
/// preventing the default suppresses the automatic focus move that would
/// follow.
pub trait ScopeHandlers<K> {
    /// The scope is about to auto-focus its first focusable descendant.
    fn on_mount_auto_focus(&mut self, event: &mut Cancelable<AutoFocus<K>>) {
        let _ = event;
    }

    /// The scope is about to restore focus to where it was before
    /// activation.
    fn on_unmount_auto_focus(&mut self, event: &mut Cancelable<AutoFocus<K>>) {
        let _ = event;
    }
}

/// Focus containment for one overlay region.
///
/// A `FocusScope` manages focus around a container element: on activation
/// it moves focus inside (auto-focus), while active it keeps focus from
/// leaving (the trap) and wraps Tab traversal at the region's edges, and on
/// deactivation it restores focus to wherever it was before.
///
/// Scopes nest through the shared [`ScopeStack`]: activating a scope pauses
/// the previous head, so only the innermost scope traps at a time.
///
/// ## Host wiring
///
/// The host forwards document-level focus-in/focus-out into the
/// `on_document_*` methods, wires the container's key-down handler to
/// [`on_key_down`](Self::on_key_down) (honoring a `true` return as
/// prevent-default), and reports child-removal tree mutations under the
/// container through [`on_mutation`](Self::on_mutation).
///
/// # Example
///
/// ```
/// use emergent_focus_scope::{FocusScope, FocusScopeOptions, ScopeStack};
/// use emergent_surface::FocusEnvironment;
/// use emergent_surface::mock::MockSurface;
///
/// let mut surface = MockSurface::new();
/// surface.insert(1, None); // the region root
/// surface.insert(2, Some(1));
/// surface.set_tab_index(2, 0);
///
/// let mut stack = ScopeStack::new();
/// let mut scope = FocusScope::new(
///     &mut stack,
///     FocusScopeOptions { trapped: true, wrap: true },
/// );
///
/// let tree = surface.clone();
/// scope.activate(1, &tree, &mut surface, &mut stack, &mut ());
/// assert_eq!(surface.active_element(), Some(2));
///
/// let tree = surface.clone();
/// scope.deactivate(&tree, &mut surface, &mut stack, &mut ());
/// assert_eq!(surface.active_element(), None); // restored to the root
/// ```
#[derive(Debug)]
pub struct FocusScope<K> {
    container: Option<K>,
    options: FocusScopeOptions,
    scope: ScopeId,
    active: bool,
    last_focused: Option<K>,
    previously_focused: Option<K>,
}

impl<K> ScopeHandlers<K> for () {}

impl<K> FocusScope<K> {
    /// Creates an inactive scope, allocating its identity from the stack.
    pub fn new(stack: &mut ScopeStack, options: FocusScopeOptions) -> Self {
        Self {
            container: None,
            options,
            scope: stack.allocate(),
            active: false,
            last_focused: None,
            previously_focused: None,
        }
    }

    /// This scope's identity within the shared stack.
    #[must_use]
    pub const fn scope_id(&self) -> ScopeId {
        self.scope
    }

    /// The region root, once bound.
    #[must_use]
    pub const fn container(&self) -> Option<K>
    where
        K: Copy,
    {
        self.container
    }

    /// Whether the scope has performed activation and not yet deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Binds the region root without trapping.
    ///
    /// Use this for wrap-only scopes (`trapped: false`): Tab wrapping via
    /// [`on_key_down`](Self::on_key_down) needs the container, but no stack
    /// registration or auto-focus takes place.
    pub fn attach(&mut self, container: K) {
        self.container = Some(container);
    }
}

impl<K> FocusScope<K>
where
    K: Copy + Eq,
{
    /// Activates the scope around `container`.
    ///
    /// For a trapped scope this records the previously focused element,
    /// registers with the stack (pausing the previous head), and performs
    /// auto-focus: unless focus already rests inside the region, a
    /// cancelable [`ScopeHandlers::on_mount_auto_focus`] notification fires
    /// and, when unprevented, the first focusable non-link descendant is
    /// focused (text content selected). When no descendant accepts focus,
    /// the container itself is focused.
    ///
    /// For an untrapped scope this only binds the container, like
    /// [`attach`](Self::attach).
    pub fn activate<T, E>(
        &mut self,
        container: K,
        tree: &T,
        env: &mut E,
        stack: &mut ScopeStack,
        handlers: &mut impl ScopeHandlers<K>,
    ) where
        T: SurfaceTree<K> + ?Sized,
        E: FocusEnvironment<K> + ?Sized,
    {
        self.container = Some(container);
        if !self.options.trapped {
            return;
        }
        self.active = true;
        self.previously_focused = env.active_element();
        stack.add(self.scope);

        let already_inside = self
            .previously_focused
            .is_some_and(|element| tree.contains(container, element));
        if already_inside {
            self.last_focused = self.previously_focused;
            return;
        }

        let mut event = Cancelable::new(AutoFocus { container });
        handlers.on_mount_auto_focus(&mut event);
        if !event.default_prevented() {
            let candidates = remove_links(tree, focus_candidates(tree, container));
            if !focus_first(tree, env, &candidates, true) {
                focus(tree, env, container, false);
            }
        }
        self.last_focused = env
            .active_element()
            .filter(|&element| tree.contains(container, element));
    }

    /// Deactivates the scope, restoring focus.
    ///
    /// A cancelable [`ScopeHandlers::on_unmount_auto_focus`] notification
    /// fires and, when unprevented, focus returns to the previously focused
    /// element — or to the document root when that element is no longer
    /// attached. The scope then leaves the stack, resuming the new head.
    /// No-op unless [`activate`](Self::activate) had trapped.
    pub fn deactivate<T, E>(
        &mut self,
        tree: &T,
        env: &mut E,
        stack: &mut ScopeStack,
        handlers: &mut impl ScopeHandlers<K>,
    ) where
        T: SurfaceTree<K> + ?Sized,
        E: FocusEnvironment<K> + ?Sized,
    {
        if !self.active {
            return;
        }
        self.active = false;

        if let Some(container) = self.container {
            let mut event = Cancelable::new(AutoFocus { container });
            handlers.on_unmount_auto_focus(&mut event);
            if !event.default_prevented() {
                match self.previously_focused {
                    Some(element) if tree.is_attached(element) => {
                        focus(tree, env, element, true);
                    }
                    _ => env.focus_root(),
                }
            }
        }
        stack.remove(self.scope);
        self.last_focused = None;
        self.previously_focused = None;
    }

    /// Feeds a document-level focus-in to the scope.
    ///
    /// While trapping (active and unpaused): focus landing inside the
    /// region is remembered; focus landing outside is pulled back to the
    /// last-focused element.
    pub fn on_document_focus_in<T, E>(
        &mut self,
        tree: &T,
        env: &mut E,
        stack: &ScopeStack,
        event: FocusIn<K>,
    ) where
        T: SurfaceTree<K> + ?Sized,
        E: FocusEnvironment<K> + ?Sized,
    {
        if !self.is_trapping(stack) {
            return;
        }
        let Some(container) = self.container else {
            return;
        };
        if tree.contains(container, event.target) {
            self.last_focused = Some(event.target);
        } else {
            focus_optional(tree, env, self.last_focused, true);
        }
    }

    /// Feeds a document-level focus-out to the scope.
    ///
    /// Acts on the leading edge of a focus move: when the host knows the
    /// destination and it lies outside the region, focus is pulled back
    /// before the move commits. A focus-out with no destination (focus
    /// falling to the root) is left alone — the focus-in path handles
    /// whatever comes next.
    pub fn on_document_focus_out<T, E>(
        &mut self,
        tree: &T,
        env: &mut E,
        stack: &ScopeStack,
        event: FocusOut<K>,
    ) where
        T: SurfaceTree<K> + ?Sized,
        E: FocusEnvironment<K> + ?Sized,
    {
        if !self.is_trapping(stack) {
            return;
        }
        let Some(container) = self.container else {
            return;
        };
        let Some(destination) = event.related else {
            return;
        };
        if !tree.contains(container, destination) {
            focus_optional(tree, env, self.last_focused, true);
        }
    }

    /// Reports a tree mutation under the container.
    ///
    /// When focus fell back to the document root (the focused descendant was
    /// removed) and the mutation removed children, the container is
    /// refocused as a fallback.
    pub fn on_mutation<T, E>(&mut self, tree: &T, env: &mut E, removed: bool)
    where
        T: SurfaceTree<K> + ?Sized,
        E: FocusEnvironment<K> + ?Sized,
    {
        if !self.active || !removed {
            return;
        }
        if env.active_element().is_some() {
            return;
        }
        if let Some(container) = self.container {
            focus(tree, env, container, false);
        }
    }

    /// Feeds a key-down observed on the container.
    ///
    /// Returns `true` when the host must prevent the key's default action.
    /// Only an otherwise-unmodified Tab at a tabbable edge does anything,
    /// and only a wrapping scope prevents and wraps; a trapped-but-unwrapped
    /// scope leaves sequential traversal alone (containment is enforced by
    /// the focus notifications instead).
    pub fn on_key_down<T, E>(
        &mut self,
        tree: &T,
        env: &mut E,
        stack: &ScopeStack,
        event: &KeyDown,
    ) -> bool
    where
        T: SurfaceTree<K> + ?Sized,
        E: FocusEnvironment<K> + ?Sized,
    {
        if !self.options.wrap && !self.options.trapped {
            return false;
        }
        if stack.is_paused(self.scope) {
            return false;
        }
        let Some(container) = self.container else {
            return false;
        };
        if event.key != Key::Tab
            || event
                .modifiers
                .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return false;
        }
        let Some(focused) = env.active_element() else {
            return false;
        };
        let backwards = event.modifiers.contains(Modifiers::SHIFT);
        let (first, last) = tabbable_edges(tree, container);
        let (Some(first), Some(last)) = (first, last) else {
            return false;
        };
        if !backwards && focused == last {
            if self.options.wrap {
                focus(tree, env, first, true);
                return true;
            }
        } else if backwards && focused == first && self.options.wrap {
            focus(tree, env, last, true);
            return true;
        }
        false
    }

    fn is_trapping(&self, stack: &ScopeStack) -> bool {
        self.options.trapped && self.active && !stack.is_paused(self.scope)
    }
}
