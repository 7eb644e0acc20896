// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared layer registry.
//!
//! One [`LayerStack`] exists per root element tree. It records, in mount
//! order, every overlay layer currently mounted, which of them request
//! exclusive pointer input, and which regions are branches (exempt from
//! outside-dismissal everywhere). Controllers never talk to each other;
//! they only query this registry at event time.
//!
//! Mutations bump a generation counter. That counter is the change
//! broadcast: a host that cached an eligibility decision can compare
//! generations to know the cache is stale. Controllers in this crate do not
//! cache — they re-query on every event — so they always observe a fully
//! updated registry.

use emergent_surface::SurfaceTree;
use smallvec::SmallVec;

/// Observer for registry misuse that is deliberately tolerated at runtime.
///
/// The registry never fails: unmounting a layer that was never mounted is a
/// no-op, and an exclusivity request for an unmounted layer is ignored. Both
/// indicate an unbalanced embedder, which shows up to users as a layer that
/// never dismisses. Hook this trait to log such states.
pub trait StackTrace<K> {
    /// An unmount was requested for a layer not present in the registry.
    fn unregistered_unmount(&mut self, layer: K) {
        let _ = layer;
    }

    /// A mount was requested for a layer already present in the registry.
    fn duplicate_mount(&mut self, layer: K) {
        let _ = layer;
    }

    /// An exclusivity change was requested for an unmounted layer.
    fn exclusive_on_unmounted(&mut self, layer: K) {
        let _ = layer;
    }
}

/// No-op trace sink.
impl<K> StackTrace<K> for () {}

/// Effects of a layer mount the host must apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MountUpdate {
    /// The layer was newly inserted into the registry.
    pub registered: bool,
    /// This mount is the first exclusive layer: the host must snapshot its
    /// ambient body pointer-events value and set the body inert.
    pub snapshot_body_pointer_events: bool,
}

/// Effects of a layer unmount the host must apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UnmountUpdate {
    /// The layer was present and has been removed.
    pub unregistered: bool,
    /// This was the last exclusive layer: the host must restore the body
    /// pointer-events value saved at the matching snapshot.
    pub restore_body_pointer_events: bool,
}

/// Effects of an exclusivity change on a mounted layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusiveUpdate {
    /// Membership in the exclusive set actually changed.
    pub changed: bool,
    /// The layer became the first exclusive member; snapshot as for
    /// [`MountUpdate::snapshot_body_pointer_events`].
    pub snapshot_body_pointer_events: bool,
    /// The layer was the last exclusive member; restore as for
    /// [`UnmountUpdate::restore_body_pointer_events`].
    pub restore_body_pointer_events: bool,
}

/// Pointer-events override a layer applies to its own element while the
/// body is inert.
///
/// This is what lets a layer stacked above the highest exclusive layer keep
/// receiving pointer input while everything below is inert.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEvents {
    /// Force the layer's element interactive.
    Auto,
    /// Force the layer's element inert.
    None,
}

/// Ordered registry of mounted overlay layers.
///
/// - `layers` is kept in mount order; order never changes after insertion
///   (an exclusivity change on a mounted layer does not reorder it).
/// - `exclusive` is always a subset of `layers`, in insertion order;
///   removal from `layers` removes exclusive membership too.
/// - `branches` are subtree roots exempt from every outside-interaction
///   check.
///
/// # Example
///
/// ```
/// use emergent_layers::LayerStack;
///
/// let mut stack: LayerStack<u32> = LayerStack::new();
/// let a = stack.mount(1, false);
/// let b = stack.mount(2, true);
///
/// assert!(a.registered && !a.snapshot_body_pointer_events);
/// assert!(b.snapshot_body_pointer_events);
///
/// // Layer 2 masks layer 1's pointer input.
/// assert!(stack.is_pointer_events_enabled(2));
/// assert!(!stack.is_pointer_events_enabled(1));
/// // Escape still targets the topmost mounted layer, an independent query.
/// assert!(stack.is_top_layer(2));
/// ```
#[derive(Clone, Debug)]
pub struct LayerStack<K> {
    layers: SmallVec<[K; 4]>,
    exclusive: SmallVec<[K; 4]>,
    branches: SmallVec<[K; 2]>,
    generation: u64,
}

impl<K> Default for LayerStack<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LayerStack<K> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: SmallVec::new_const(),
            exclusive: SmallVec::new_const(),
            branches: SmallVec::new_const(),
            generation: 0,
        }
    }

    /// Current change generation; bumped whenever `layers` or the exclusive
    /// set changes.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of mounted layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layer is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<K> LayerStack<K>
where
    K: Copy + Eq,
{
    /// Registers a layer at the top of the stack.
    ///
    /// With `exclusive` set, the layer also joins the exclusive set; when it
    /// is the first member, the returned update asks the host to snapshot
    /// the ambient body pointer-events value and disable it. Mounting an
    /// already-mounted layer is a no-op.
    pub fn mount(&mut self, layer: K, exclusive: bool) -> MountUpdate {
        self.mount_with_trace(layer, exclusive, &mut ())
    }

    /// [`mount`](Self::mount) with a [`StackTrace`] sink for misuse.
    pub fn mount_with_trace(
        &mut self,
        layer: K,
        exclusive: bool,
        trace: &mut impl StackTrace<K>,
    ) -> MountUpdate {
        if self.layers.contains(&layer) {
            trace.duplicate_mount(layer);
            return MountUpdate::default();
        }
        let mut update = MountUpdate {
            registered: true,
            snapshot_body_pointer_events: false,
        };
        if exclusive {
            update.snapshot_body_pointer_events = self.exclusive.is_empty();
            self.exclusive.push(layer);
        }
        self.layers.push(layer);
        self.touch();
        update
    }

    /// Changes a mounted layer's exclusivity request in place.
    ///
    /// The layer's position in the stack is untouched: order reflects mount
    /// time only, never later request changes. Requests for unmounted layers
    /// are ignored (the exclusive set stays a subset of the mounted set).
    pub fn set_exclusive(&mut self, layer: K, exclusive: bool) -> ExclusiveUpdate {
        self.set_exclusive_with_trace(layer, exclusive, &mut ())
    }

    /// [`set_exclusive`](Self::set_exclusive) with a [`StackTrace`] sink.
    pub fn set_exclusive_with_trace(
        &mut self,
        layer: K,
        exclusive: bool,
        trace: &mut impl StackTrace<K>,
    ) -> ExclusiveUpdate {
        if !self.layers.contains(&layer) {
            trace.exclusive_on_unmounted(layer);
            return ExclusiveUpdate::default();
        }
        let present = self.exclusive.contains(&layer);
        if exclusive && !present {
            let snapshot = self.exclusive.is_empty();
            self.exclusive.push(layer);
            self.touch();
            ExclusiveUpdate {
                changed: true,
                snapshot_body_pointer_events: snapshot,
                restore_body_pointer_events: false,
            }
        } else if !exclusive && present {
            let restore = self.exclusive.len() == 1;
            self.exclusive.retain(|l| *l != layer);
            self.touch();
            ExclusiveUpdate {
                changed: true,
                snapshot_body_pointer_events: false,
                restore_body_pointer_events: restore,
            }
        } else {
            ExclusiveUpdate::default()
        }
    }

    /// Removes a layer from the registry (and from the exclusive set).
    ///
    /// When the layer was the last exclusive member at the moment of
    /// removal, the returned update asks the host to restore the saved body
    /// pointer-events value. Unmounting an unregistered layer is a no-op.
    pub fn unmount(&mut self, layer: K) -> UnmountUpdate {
        self.unmount_with_trace(layer, &mut ())
    }

    /// [`unmount`](Self::unmount) with a [`StackTrace`] sink for misuse.
    pub fn unmount_with_trace(
        &mut self,
        layer: K,
        trace: &mut impl StackTrace<K>,
    ) -> UnmountUpdate {
        if !self.layers.contains(&layer) {
            trace.unregistered_unmount(layer);
            return UnmountUpdate::default();
        }
        let restore = self.exclusive.contains(&layer) && self.exclusive.len() == 1;
        self.layers.retain(|l| *l != layer);
        self.exclusive.retain(|l| *l != layer);
        self.touch();
        UnmountUpdate {
            unregistered: true,
            restore_body_pointer_events: restore,
        }
    }

    /// Registers a branch region. Its subtree is never treated as "outside"
    /// for any layer. Adding a registered branch again is a no-op.
    pub fn add_branch(&mut self, branch: K) {
        if !self.branches.contains(&branch) {
            self.branches.push(branch);
        }
    }

    /// Unregisters a branch region; idempotent.
    pub fn remove_branch(&mut self, branch: K) {
        self.branches.retain(|b| *b != branch);
    }

    /// Position of a layer in mount order.
    #[must_use]
    pub fn index_of(&self, layer: K) -> Option<usize> {
        self.layers.iter().position(|l| *l == layer)
    }

    /// Whether `layer` is the most recently mounted layer.
    ///
    /// This is the escape-key eligibility predicate. It is deliberately
    /// different from [`is_pointer_events_enabled`](Self::is_pointer_events_enabled):
    /// escape always targets the last-mounted layer, while pointer input
    /// targets every layer at or above the highest exclusive one.
    #[must_use]
    pub fn is_top_layer(&self, layer: K) -> bool {
        self.layers.last() == Some(&layer)
    }

    /// Mount-order index of the most recently registered exclusive layer.
    #[must_use]
    pub fn highest_exclusive_index(&self) -> Option<usize> {
        self.exclusive.last().and_then(|l| self.index_of(*l))
    }

    /// Whether any layer currently requests exclusive pointer input, i.e.
    /// the body is inert.
    #[must_use]
    pub fn is_body_pointer_events_disabled(&self) -> bool {
        !self.exclusive.is_empty()
    }

    /// Whether `layer` currently receives pointer input.
    ///
    /// A layer is pointer-enabled when it sits at or above the highest
    /// exclusive layer in mount order; with no exclusive layer mounted,
    /// everything is enabled.
    #[must_use]
    pub fn is_pointer_events_enabled(&self, layer: K) -> bool {
        match (self.index_of(layer), self.highest_exclusive_index()) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(index), Some(highest)) => index >= highest,
        }
    }

    /// The pointer-events style a layer must force onto its own element.
    ///
    /// `None` (no override) while the body is interactive; otherwise the
    /// override that keeps eligible layers interactive above the inert
    /// body.
    #[must_use]
    pub fn pointer_events_override(&self, layer: K) -> Option<PointerEvents> {
        if !self.is_body_pointer_events_disabled() {
            return None;
        }
        Some(if self.is_pointer_events_enabled(layer) {
            PointerEvents::Auto
        } else {
            PointerEvents::None
        })
    }

    /// Whether `target` lies inside any registered branch region.
    #[must_use]
    pub fn is_in_branch<T>(&self, tree: &T, target: K) -> bool
    where
        T: SurfaceTree<K> + ?Sized,
    {
        self.branches.iter().any(|&b| tree.contains(b, target))
    }

    /// Mounted layers in mount order.
    #[must_use]
    pub fn layers(&self) -> &[K] {
        &self.layers
    }

    /// Exclusive layers in insertion order.
    #[must_use]
    pub fn exclusive_layers(&self) -> &[K] {
        &self.exclusive
    }

    /// Registered branch regions.
    #[must_use]
    pub fn branches(&self) -> &[K] {
        &self.branches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn mount_order_is_the_only_ranking() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        for id in [10, 20, 30] {
            stack.mount(id, false);
        }
        assert_eq!(stack.index_of(10), Some(0));
        assert_eq!(stack.index_of(20), Some(1));
        assert_eq!(stack.index_of(30), Some(2));

        // A later exclusivity change must not reorder anything.
        stack.set_exclusive(10, true);
        assert_eq!(stack.index_of(10), Some(0));
        assert!(stack.is_top_layer(30));
    }

    #[test]
    fn exclusive_is_subset_of_layers() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        stack.mount(1, true);
        stack.mount(2, true);
        stack.unmount(1);
        for &layer in stack.exclusive_layers() {
            assert!(
                stack.index_of(layer).is_some(),
                "exclusive must be subset of layers"
            );
        }

        // Exclusivity on an unmounted layer is refused outright.
        let update = stack.set_exclusive(99, true);
        assert!(!update.changed);
        assert!(stack.exclusive_layers().iter().all(|&l| l != 99));
    }

    #[test]
    fn snapshot_on_first_exclusive_restore_on_last() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        assert!(stack.mount(1, true).snapshot_body_pointer_events);
        assert!(!stack.mount(2, true).snapshot_body_pointer_events);

        assert!(!stack.unmount(2).restore_body_pointer_events);
        assert!(stack.unmount(1).restore_body_pointer_events);
        assert!(!stack.is_body_pointer_events_disabled());
    }

    #[test]
    fn pointer_eligibility_follows_highest_exclusive() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        stack.mount(1, false);
        stack.mount(2, true);
        stack.mount(3, false);

        assert!(!stack.is_pointer_events_enabled(1));
        assert!(stack.is_pointer_events_enabled(2));
        assert!(stack.is_pointer_events_enabled(3));

        assert_eq!(stack.pointer_events_override(1), Some(PointerEvents::None));
        assert_eq!(stack.pointer_events_override(3), Some(PointerEvents::Auto));

        stack.unmount(2);
        assert!(stack.is_pointer_events_enabled(1));
        assert_eq!(stack.pointer_events_override(1), None);
    }

    #[test]
    fn escape_and_pointer_predicates_differ() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        stack.mount(1, true);
        stack.mount(2, false);

        // 2 is topmost (escape target) and pointer-enabled; 1 is neither
        // topmost nor masked (it is the highest exclusive itself).
        assert!(stack.is_top_layer(2));
        assert!(!stack.is_top_layer(1));
        assert!(stack.is_pointer_events_enabled(1));
        assert!(stack.is_pointer_events_enabled(2));
    }

    #[test]
    fn unmount_is_idempotent_and_traced() {
        #[derive(Default)]
        struct Recorder(Vec<u32>);
        impl StackTrace<u32> for Recorder {
            fn unregistered_unmount(&mut self, layer: u32) {
                self.0.push(layer);
            }
        }

        let mut stack: LayerStack<u32> = LayerStack::new();
        let mut trace = Recorder::default();
        let update = stack.unmount_with_trace(7, &mut trace);
        assert!(!update.unregistered);
        assert_eq!(trace.0, [7]);
    }

    #[test]
    fn duplicate_mount_is_a_noop() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        stack.mount(1, false);
        let update = stack.mount(1, true);
        assert!(!update.registered);
        assert_eq!(stack.len(), 1);
        assert!(!stack.is_body_pointer_events_disabled());
    }

    #[test]
    fn generation_bumps_on_layer_changes_only() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        let g0 = stack.generation();
        stack.mount(1, false);
        assert_ne!(stack.generation(), g0);

        let g1 = stack.generation();
        stack.add_branch(50);
        assert_eq!(stack.generation(), g1);

        stack.set_exclusive(1, true);
        assert_ne!(stack.generation(), g1);
    }

    #[test]
    fn round_trip_restores_baseline() {
        let mut stack: LayerStack<u32> = LayerStack::new();
        assert!(stack.is_empty());

        let m1 = stack.mount(1, true);
        let m2 = stack.mount(2, false);
        stack.add_branch(9);
        let u2 = stack.unmount(2);
        let u1 = stack.unmount(1);
        stack.remove_branch(9);

        assert!(m1.registered && m2.registered);
        assert!(u1.unregistered && u2.unregistered);
        // Every activation side effect has its exact reversal.
        assert_eq!(
            m1.snapshot_body_pointer_events,
            u1.restore_body_pointer_events
        );
        assert!(stack.is_empty());
        assert!(stack.exclusive_layers().is_empty());
        assert!(stack.branches().is_empty());
    }
}
