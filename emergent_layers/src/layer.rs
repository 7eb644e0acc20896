// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use emergent_surface::SurfaceTree;
use emergent_surface::dispatch::Cancelable;
use emergent_surface::event::{FocusIn, Key, KeyDown, PointerDown};

use crate::outside::{FocusOutside, PointerDownOutside};
use crate::stack::{ExclusiveUpdate, LayerStack, MountUpdate, PointerEvents, UnmountUpdate};

/// Per-layer configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerOptions {
    /// Request exclusive pointer input: pointer interaction with everything
    /// below this layer (the body included) is disabled while it is mounted.
    pub disable_outside_pointer_events: bool,
}

/// What kind of outside interaction triggered a dismissal event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutsideDetail<K> {
    /// A pointer-down landed outside the layer.
    Pointer(PointerDown<K>),
    /// Focus moved outside the layer.
    Focus(FocusIn<K>),
}

impl<K: Copy> OutsideDetail<K> {
    /// The element the outside interaction landed on.
    #[must_use]
    pub fn target(&self) -> K {
        match self {
            Self::Pointer(event) => event.target,
            Self::Focus(event) => event.target,
        }
    }
}

/// Consumer callbacks for a [`DismissableLayer`].
///
/// Every method has an empty default body; implement only what you need.
/// The cancelable methods run before the layer's default action (dismissal);
/// calling `prevent_default` on the event suppresses it.
pub trait DismissHandlers<K> {
    /// Escape was pressed while this layer is topmost. Prevent the default
    /// to keep the layer open.
    fn on_escape_key_down(&mut self, event: &mut Cancelable<KeyDown>) {
        let _ = event;
    }

    /// A pointer-down landed outside the layer.
    fn on_pointer_down_outside(&mut self, event: &mut Cancelable<OutsideDetail<K>>) {
        let _ = event;
    }

    /// Focus moved outside the layer.
    fn on_focus_outside(&mut self, event: &mut Cancelable<OutsideDetail<K>>) {
        let _ = event;
    }

    /// Any outside interaction, pointer or focus. Runs after the specific
    /// handler on the same event, so prevention from either is honored.
    fn on_interact_outside(&mut self, event: &mut Cancelable<OutsideDetail<K>>) {
        let _ = event;
    }

    /// The layer's default dismissal action. Unmount the layer here.
    fn on_dismiss(&mut self) {}
}

/// The per-surface dismissal controller.
///
/// One `DismissableLayer` manages one overlay element: it registers the
/// element with the shared [`LayerStack`], owns the two outside-interaction
/// detectors, and turns document-level input the host forwards in into
/// [`DismissHandlers`] callbacks — gated so that only the eligible layer
/// reacts when several are mounted.
///
/// ## Host wiring
///
/// The host forwards four document-level streams into the `on_document_*`
/// methods, and wires the element's own capture-phase handlers to the
/// `*_capture` markers. Exactly one [`tick`](Self::tick) call on the input
/// turn after [`attach`](Self::attach) arms the pointer detector.
#[derive(Debug)]
pub struct DismissableLayer<K> {
    node: Option<K>,
    disable_outside_pointer_events: bool,
    pointer_outside: PointerDownOutside<K>,
    focus_outside: FocusOutside,
}

impl<K> DismissableLayer<K> {
    /// Creates an unmounted controller.
    #[must_use]
    pub const fn new(options: LayerOptions) -> Self {
        Self {
            node: None,
            disable_outside_pointer_events: options.disable_outside_pointer_events,
            pointer_outside: PointerDownOutside::new(),
            focus_outside: FocusOutside::new(),
        }
    }

    /// The element this layer manages, once attached.
    #[must_use]
    pub const fn node(&self) -> Option<K>
    where
        K: Copy,
    {
        self.node
    }

    /// Whether the layer currently requests exclusive pointer input.
    #[must_use]
    pub const fn disables_outside_pointer_events(&self) -> bool {
        self.disable_outside_pointer_events
    }

    /// Arms the pointer detector. Call once, on the input turn after
    /// [`attach`](Self::attach): the pointer-down that mounted the layer
    /// must not be seen as an outside interaction.
    pub fn tick(&mut self) {
        self.pointer_outside.tick();
    }

    /// Capture-phase marker on the layer element: a pointer-down started
    /// inside this layer.
    pub fn on_pointer_down_capture(&mut self) {
        self.pointer_outside.mark_inside();
    }

    /// Capture-phase marker on the layer element: focus is entering it.
    pub fn on_focus_capture(&mut self) {
        self.focus_outside.mark_focus_inside();
    }

    /// Capture-phase marker on the layer element: focus is leaving it.
    pub fn on_blur_capture(&mut self) {
        self.focus_outside.mark_blur_inside();
    }
}

impl<K> DismissableLayer<K>
where
    K: Copy + Eq,
{
    /// Binds the controller to its element and registers it with the stack.
    ///
    /// The element is resolved here rather than in `new` because the host
    /// typically creates the controller before the element exists. Both
    /// detectors restart from scratch; the host applies the returned
    /// [`MountUpdate`] and then calls [`tick`](Self::tick) on the next
    /// input turn.
    pub fn attach(&mut self, node: K, stack: &mut LayerStack<K>) -> MountUpdate {
        self.node = Some(node);
        self.pointer_outside.cancel();
        self.focus_outside.reset();
        stack.mount(node, self.disable_outside_pointer_events)
    }

    /// Unregisters the layer and tears its detectors down.
    pub fn detach(&mut self, stack: &mut LayerStack<K>) -> UnmountUpdate {
        self.pointer_outside.cancel();
        self.focus_outside.reset();
        match self.node.take() {
            Some(node) => stack.unmount(node),
            None => UnmountUpdate::default(),
        }
    }

    /// Changes the exclusive-pointer-input request on a mounted layer.
    pub fn set_disable_outside_pointer_events(
        &mut self,
        stack: &mut LayerStack<K>,
        disable: bool,
    ) -> ExclusiveUpdate {
        self.disable_outside_pointer_events = disable;
        match self.node {
            Some(node) => stack.set_exclusive(node, disable),
            None => ExclusiveUpdate::default(),
        }
    }

    /// The pointer-events style the host must force onto the layer element,
    /// given the current stack state. `None` means no override.
    #[must_use]
    pub fn pointer_events_override(&self, stack: &LayerStack<K>) -> Option<PointerEvents> {
        let node = self.node?;
        stack.pointer_events_override(node)
    }

    /// Feeds a document-level key-down to the layer.
    ///
    /// Only an unmodified Escape on the topmost mounted layer does anything:
    /// the [`DismissHandlers::on_escape_key_down`] chain runs and, unless it
    /// prevented the default, the layer dismisses. Returns whether a
    /// dismissal happened.
    pub fn on_document_key_down(
        &mut self,
        stack: &LayerStack<K>,
        event: KeyDown,
        handlers: &mut impl DismissHandlers<K>,
    ) -> bool {
        if event.key != Key::Escape || !event.modifiers.is_empty() {
            return false;
        }
        let Some(node) = self.node else {
            return false;
        };
        if !stack.is_top_layer(node) {
            return false;
        }
        let mut cancelable = Cancelable::new(event);
        handlers.on_escape_key_down(&mut cancelable);
        if cancelable.default_prevented() {
            return false;
        }
        // Consume the key so the host does not also act on it.
        cancelable.prevent_default();
        handlers.on_dismiss();
        true
    }

    /// Feeds a document-level pointer-down to the layer.
    ///
    /// Returns whether a dismissal happened. Touch pointers never dismiss
    /// here; their report is deferred to [`on_document_click`](Self::on_document_click).
    pub fn on_document_pointer_down<T>(
        &mut self,
        stack: &LayerStack<K>,
        tree: &T,
        event: PointerDown<K>,
        handlers: &mut impl DismissHandlers<K>,
    ) -> bool
    where
        T: SurfaceTree<K> + ?Sized,
    {
        match self.pointer_outside.on_pointer_down(&event) {
            Some(delivery) => {
                self.deliver_pointer_outside(stack, tree, delivery.event.detail, handlers)
            }
            None => false,
        }
    }

    /// Feeds a document-level click, releasing any deferred touch report.
    pub fn on_document_click<T>(
        &mut self,
        stack: &LayerStack<K>,
        tree: &T,
        handlers: &mut impl DismissHandlers<K>,
    ) -> bool
    where
        T: SurfaceTree<K> + ?Sized,
    {
        match self.pointer_outside.on_click() {
            Some(delivery) => {
                self.deliver_pointer_outside(stack, tree, delivery.event.detail, handlers)
            }
            None => false,
        }
    }

    fn deliver_pointer_outside<T>(
        &mut self,
        stack: &LayerStack<K>,
        tree: &T,
        event: PointerDown<K>,
        handlers: &mut impl DismissHandlers<K>,
    ) -> bool
    where
        T: SurfaceTree<K> + ?Sized,
    {
        let Some(node) = self.node else {
            return false;
        };
        // A layer masked by a higher exclusive layer never reacts, and
        // branch regions are exempt from outside-dismissal entirely.
        if !stack.is_pointer_events_enabled(node) || stack.is_in_branch(tree, event.target) {
            return false;
        }
        let mut cancelable = Cancelable::new(OutsideDetail::Pointer(event));
        handlers.on_pointer_down_outside(&mut cancelable);
        handlers.on_interact_outside(&mut cancelable);
        if cancelable.default_prevented() {
            return false;
        }
        handlers.on_dismiss();
        true
    }

    /// Feeds a document-level focus-in to the layer.
    ///
    /// Returns whether a dismissal happened.
    pub fn on_document_focus_in<T>(
        &mut self,
        stack: &LayerStack<K>,
        tree: &T,
        event: FocusIn<K>,
        handlers: &mut impl DismissHandlers<K>,
    ) -> bool
    where
        T: SurfaceTree<K> + ?Sized,
    {
        if self.node.is_none() {
            return false;
        }
        let Some(delivery) = self.focus_outside.on_focus_in(&event) else {
            return false;
        };
        if stack.is_in_branch(tree, delivery.event.detail.target) {
            return false;
        }
        let mut cancelable = Cancelable::new(OutsideDetail::Focus(delivery.event.detail));
        handlers.on_focus_outside(&mut cancelable);
        handlers.on_interact_outside(&mut cancelable);
        if cancelable.default_prevented() {
            return false;
        }
        handlers.on_dismiss();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use emergent_surface::event::{Modifiers, PointerType};
    use emergent_surface::mock::MockSurface;

    #[derive(Default)]
    struct Recorder {
        escapes: u32,
        pointer_outside: Vec<u32>,
        focus_outside: Vec<u32>,
        interact_outside: Vec<u32>,
        dismissals: u32,
        prevent_next: bool,
    }

    impl DismissHandlers<u32> for Recorder {
        fn on_escape_key_down(&mut self, event: &mut Cancelable<KeyDown>) {
            self.escapes += 1;
            if self.prevent_next {
                event.prevent_default();
            }
        }

        fn on_pointer_down_outside(&mut self, event: &mut Cancelable<OutsideDetail<u32>>) {
            self.pointer_outside.push(event.detail.target());
            if self.prevent_next {
                event.prevent_default();
            }
        }

        fn on_focus_outside(&mut self, event: &mut Cancelable<OutsideDetail<u32>>) {
            self.focus_outside.push(event.detail.target());
            if self.prevent_next {
                event.prevent_default();
            }
        }

        fn on_interact_outside(&mut self, event: &mut Cancelable<OutsideDetail<u32>>) {
            self.interact_outside.push(event.detail.target());
        }

        fn on_dismiss(&mut self) {
            self.dismissals += 1;
        }
    }

    fn surface_with(ids: &[u32]) -> MockSurface {
        let mut surface = MockSurface::new();
        for &id in ids {
            surface.insert(id, None);
        }
        surface
    }

    fn mouse_down(target: u32) -> PointerDown<u32> {
        PointerDown {
            target,
            pointer_type: PointerType::Mouse,
        }
    }

    #[test]
    fn escape_dismisses_only_the_topmost_layer() {
        let mut stack = LayerStack::new();
        let mut lower = DismissableLayer::new(LayerOptions::default());
        let mut upper = DismissableLayer::new(LayerOptions::default());
        lower.attach(1, &mut stack);
        upper.attach(2, &mut stack);

        let mut lower_rec = Recorder::default();
        let mut upper_rec = Recorder::default();
        let escape = KeyDown::unmodified(Key::Escape);

        assert!(!lower.on_document_key_down(&stack, escape, &mut lower_rec));
        assert!(upper.on_document_key_down(&stack, escape, &mut upper_rec));
        assert_eq!(lower_rec.escapes, 0);
        assert_eq!(upper_rec.dismissals, 1);

        // Once the upper layer unmounts, Escape reaches the lower one.
        upper.detach(&mut stack);
        assert!(lower.on_document_key_down(&stack, escape, &mut lower_rec));
        assert_eq!(lower_rec.dismissals, 1);
    }

    #[test]
    fn modified_escape_is_ignored() {
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);

        let mut recorder = Recorder::default();
        let event = KeyDown {
            key: Key::Escape,
            modifiers: Modifiers::CTRL,
        };
        assert!(!layer.on_document_key_down(&stack, event, &mut recorder));
        assert_eq!(recorder.escapes, 0);
    }

    #[test]
    fn preventing_escape_keeps_the_layer_open() {
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);

        let mut recorder = Recorder {
            prevent_next: true,
            ..Recorder::default()
        };
        let handled = layer.on_document_key_down(
            &stack,
            KeyDown::unmodified(Key::Escape),
            &mut recorder,
        );
        assert!(!handled);
        assert_eq!(recorder.escapes, 1);
        assert_eq!(recorder.dismissals, 0);
    }

    #[test]
    fn outside_pointer_down_runs_both_handlers_then_dismisses() {
        let surface = surface_with(&[1, 9]);
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);
        layer.tick();

        let mut recorder = Recorder::default();
        assert!(layer.on_document_pointer_down(&stack, &surface, mouse_down(9), &mut recorder));
        assert_eq!(recorder.pointer_outside, [9]);
        assert_eq!(recorder.interact_outside, [9]);
        assert_eq!(recorder.dismissals, 1);
    }

    #[test]
    fn inside_pointer_down_is_not_outside() {
        let surface = surface_with(&[1]);
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);
        layer.tick();

        let mut recorder = Recorder::default();
        layer.on_pointer_down_capture();
        assert!(!layer.on_document_pointer_down(&stack, &surface, mouse_down(1), &mut recorder));
        assert_eq!(recorder.dismissals, 0);
    }

    #[test]
    fn branch_target_never_dismisses() {
        let mut surface = surface_with(&[1, 7]);
        surface.insert(8, Some(7)); // child inside the branch subtree
        let mut stack = LayerStack::new();
        stack.add_branch(7);
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);
        layer.tick();

        let mut recorder = Recorder::default();
        assert!(!layer.on_document_pointer_down(&stack, &surface, mouse_down(8), &mut recorder));
        assert!(recorder.pointer_outside.is_empty());

        // Focus into the branch is exempt too.
        assert!(!layer.on_document_focus_in(&stack, &surface, FocusIn { target: 8 }, &mut recorder));
        assert_eq!(recorder.dismissals, 0);
    }

    #[test]
    fn masked_layer_ignores_outside_pointer_downs() {
        let surface = surface_with(&[1, 2, 9]);
        let mut stack = LayerStack::new();
        let mut lower = DismissableLayer::new(LayerOptions::default());
        let mut upper = DismissableLayer::new(LayerOptions {
            disable_outside_pointer_events: true,
        });
        lower.attach(1, &mut stack);
        upper.attach(2, &mut stack);
        lower.tick();
        upper.tick();

        let mut lower_rec = Recorder::default();
        let mut upper_rec = Recorder::default();
        assert!(!lower.on_document_pointer_down(&stack, &surface, mouse_down(9), &mut lower_rec));
        assert!(upper.on_document_pointer_down(&stack, &surface, mouse_down(9), &mut upper_rec));
        assert_eq!(lower_rec.dismissals, 0);
        assert_eq!(upper_rec.dismissals, 1);

        assert_eq!(lower.pointer_events_override(&stack), Some(PointerEvents::None));
        assert_eq!(upper.pointer_events_override(&stack), Some(PointerEvents::Auto));
    }

    #[test]
    fn touch_dismissal_waits_for_the_click() {
        let surface = surface_with(&[1, 9]);
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);
        layer.tick();

        let mut recorder = Recorder::default();
        let touch = PointerDown {
            target: 9,
            pointer_type: PointerType::Touch,
        };
        assert!(!layer.on_document_pointer_down(&stack, &surface, touch, &mut recorder));
        assert_eq!(recorder.dismissals, 0);

        assert!(layer.on_document_click(&stack, &surface, &mut recorder));
        assert_eq!(recorder.pointer_outside, [9]);
        assert_eq!(recorder.dismissals, 1);
    }

    #[test]
    fn focus_outside_dismisses_unless_prevented() {
        let surface = surface_with(&[1, 4]);
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);

        let mut recorder = Recorder::default();
        layer.on_focus_capture();
        assert!(!layer.on_document_focus_in(&stack, &surface, FocusIn { target: 1 }, &mut recorder));

        layer.on_blur_capture();
        assert!(layer.on_document_focus_in(&stack, &surface, FocusIn { target: 4 }, &mut recorder));
        assert_eq!(recorder.focus_outside, [4]);
        assert_eq!(recorder.dismissals, 1);

        let mut prevented = Recorder {
            prevent_next: true,
            ..Recorder::default()
        };
        assert!(!layer.on_document_focus_in(&stack, &surface, FocusIn { target: 4 }, &mut prevented));
        assert_eq!(prevented.focus_outside, [4]);
        assert_eq!(prevented.interact_outside, [4]);
        assert_eq!(prevented.dismissals, 0);
    }

    #[test]
    fn detach_resets_detectors_and_unregisters() {
        let surface = surface_with(&[1, 9]);
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions {
            disable_outside_pointer_events: true,
        });
        let mounted = layer.attach(1, &mut stack);
        assert!(mounted.snapshot_body_pointer_events);
        layer.tick();

        let unmounted = layer.detach(&mut stack);
        assert!(unmounted.unregistered);
        assert!(unmounted.restore_body_pointer_events);
        assert!(stack.is_empty());

        // After detach nothing reacts.
        let mut recorder = Recorder::default();
        assert!(!layer.on_document_pointer_down(&stack, &surface, mouse_down(9), &mut recorder));
        assert_eq!(recorder.dismissals, 0);
    }

    #[test]
    fn toggling_exclusivity_updates_the_stack_in_place() {
        let mut stack = LayerStack::new();
        let mut layer = DismissableLayer::new(LayerOptions::default());
        layer.attach(1, &mut stack);

        let update = layer.set_disable_outside_pointer_events(&mut stack, true);
        assert!(update.changed && update.snapshot_body_pointer_events);
        assert!(stack.is_body_pointer_events_disabled());

        let update = layer.set_disable_outside_pointer_events(&mut stack, false);
        assert!(update.changed && update.restore_body_pointer_events);
        assert!(!stack.is_body_pointer_events_disabled());
    }
}
