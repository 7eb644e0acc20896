// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-interaction detectors.
//!
//! Two independent state machines that watch document-level input and
//! report interactions whose target lies outside the owning region. Each
//! exposes a capture-phase marker the owning element calls to flag
//! "this interaction started inside me" — the host wires that marker into
//! the element's capture-phase handler, which runs before the document-level
//! notification reaches the detector.
//!
//! Neither detector knows about layers or branches; gating on eligibility
//! and branch exemption happens in the
//! [`DismissableLayer`](crate::DismissableLayer) that owns them.
//!
//! ## Pointer detector timing
//!
//! [`PointerDownOutside`] starts disarmed and only reacts after
//! [`tick`](PointerDownOutside::tick): subscribing during a pointer-down
//! turn must not observe that same pointer-down (the one that mounted the
//! overlay would otherwise immediately dismiss it).
//!
//! Touch pointers defer the outside report until the matching click
//! notification: hosts synthesize a click a few hundred milliseconds after
//! the finger lifts, and reactivating pointer input on the rest of the tree
//! within that window would let the synthesized click activate whatever
//! happens to be under the finger (a ghost click). Deferring to the click
//! also handles cancellation for free — a scroll or long-press never
//! produces the click, so the outside report is silently dropped when the
//! next touch replaces it or the detector is cancelled. At most one
//! deferred report is pending at a time.

use emergent_surface::dispatch::Delivery;
use emergent_surface::event::{FocusIn, PointerDown, PointerType};

/// Watches document-level pointer-downs for one owning region.
///
/// # Example
///
/// ```
/// use emergent_layers::outside::PointerDownOutside;
/// use emergent_surface::event::{PointerDown, PointerType};
///
/// let mut detector: PointerDownOutside<u32> = PointerDownOutside::new();
/// detector.tick(); // arm on the next input turn
///
/// // A pointer-down whose capture marker did not run is outside.
/// let outside = detector.on_pointer_down(&PointerDown {
///     target: 9,
///     pointer_type: PointerType::Mouse,
/// });
/// assert!(outside.is_some());
///
/// // One whose capture marker ran is inside.
/// detector.mark_inside();
/// let inside = detector.on_pointer_down(&PointerDown {
///     target: 1,
///     pointer_type: PointerType::Mouse,
/// });
/// assert!(inside.is_none());
/// ```
#[derive(Debug)]
pub struct PointerDownOutside<K> {
    armed: bool,
    inside: bool,
    pending: Option<PointerDown<K>>,
}

impl<K> Default for PointerDownOutside<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PointerDownOutside<K> {
    /// Creates a disarmed detector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            armed: false,
            inside: false,
            pending: None,
        }
    }

    /// Arms the detector. Call once, on the input turn after subscription.
    pub fn tick(&mut self) {
        self.armed = true;
    }

    /// Whether the one-tick deferral has elapsed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Capture-phase marker: the current pointer-down originated inside the
    /// owning region.
    pub fn mark_inside(&mut self) {
        self.inside = true;
    }

    /// Whether a touch report is waiting for its click.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Tears the detector down: disarms it and drops any pending report.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.inside = false;
        self.pending = None;
    }
}

impl<K> PointerDownOutside<K>
where
    K: Copy,
{
    /// Feeds a document-level pointer-down through the detector.
    ///
    /// Returns the outside report for non-touch pointers landing outside
    /// the region. Touch pointers park the report until
    /// [`on_click`](Self::on_click), replacing any previous pending report.
    /// The inside flag is consumed: it resets to false after every
    /// pointer-down, marked or not.
    pub fn on_pointer_down(&mut self, event: &PointerDown<K>) -> Option<Delivery<PointerDown<K>>> {
        if !self.armed {
            return None;
        }
        let was_inside = core::mem::replace(&mut self.inside, false);
        if was_inside {
            return None;
        }
        if event.pointer_type == PointerType::Touch {
            // Replace rather than stack: the previous click may never come.
            self.pending = Some(*event);
            None
        } else {
            Some(Delivery::discrete(*event))
        }
    }

    /// Feeds a document-level click, releasing a pending touch report.
    pub fn on_click(&mut self) -> Option<Delivery<PointerDown<K>>> {
        self.pending.take().map(Delivery::discrete)
    }
}

/// Watches document-level focus-ins for one owning region.
///
/// The owning element's capture-phase focus and blur handlers toggle the
/// inside flag; any focus-in arriving while the flag is unset landed
/// outside the region.
#[derive(Debug, Default)]
pub struct FocusOutside {
    inside: bool,
}

impl FocusOutside {
    /// Creates a detector with focus assumed outside.
    #[must_use]
    pub const fn new() -> Self {
        Self { inside: false }
    }

    /// Capture-phase marker: focus is entering the owning region.
    pub fn mark_focus_inside(&mut self) {
        self.inside = true;
    }

    /// Capture-phase marker: focus is leaving the owning region.
    pub fn mark_blur_inside(&mut self) {
        self.inside = false;
    }

    /// Resets the detector to its initial state.
    pub fn reset(&mut self) {
        self.inside = false;
    }

    /// Feeds a document-level focus-in through the detector.
    pub fn on_focus_in<K: Copy>(&mut self, event: &FocusIn<K>) -> Option<Delivery<FocusIn<K>>> {
        if self.inside {
            None
        } else {
            Some(Delivery::continuous(*event))
        }
    }
}
