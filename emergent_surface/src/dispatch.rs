// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancelable-event delivery: the one primitive every controller dispatches
//! through.
//!
//! Controllers never call host callbacks directly; they wrap a detail payload
//! in a [`Cancelable`] and run an ordered handler chain over it. A handler
//! may call [`Cancelable::prevent_default`], and the controller inspects the
//! flag afterwards to decide whether its default action (usually dismissal
//! or an automatic focus move) proceeds.
//!
//! ## Discrete vs. continuous delivery
//!
//! A [`Delivery`] pairs the event with the [`DeliveryMode`] the host must
//! honor:
//!
//! - [`DeliveryMode::Discrete`]: the event derives from a pointer or keyboard
//!   interaction. The host must flush it — run the handler chain and observe
//!   the prevented flag — before returning from the input callback that
//!   produced it, so that a consumer's `prevent_default` is seen before the
//!   input's own default action runs. No batching or deferral.
//! - [`DeliveryMode::Continuous`]: the event derives from a focus transition;
//!   delivery through the host's ordinary (possibly batched) pipeline is
//!   acceptable.
//!
//! ## Example
//!
//! ```
//! use emergent_surface::dispatch::{Cancelable, Delivery, DeliveryMode};
//!
//! let mut delivery = Delivery::discrete("outside interaction");
//! assert_eq!(delivery.mode, DeliveryMode::Discrete);
//!
//! let prevented = delivery.handle(|event| {
//!     assert_eq!(event.detail, "outside interaction");
//!     event.prevent_default();
//! });
//! assert!(prevented);
//! ```

/// How promptly a produced event must be flushed by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    /// Flush synchronously, before the producing input callback returns.
    Discrete,
    /// Ordinary delivery through the host's normal event pipeline.
    Continuous,
}

/// A cancelable event carrying a detail payload.
///
/// Handlers may prevent the default action but cannot stop sibling handlers
/// from running.
#[derive(Debug)]
pub struct Cancelable<D> {
    /// The event payload.
    pub detail: D,
    prevented: bool,
}

impl<D> Cancelable<D> {
    /// Wraps `detail` in a fresh, un-prevented event.
    pub const fn new(detail: D) -> Self {
        Self {
            detail,
            prevented: false,
        }
    }

    /// Marks the event's default action as prevented.
    pub fn prevent_default(&mut self) {
        self.prevented = true;
    }

    /// Whether some handler prevented the default action.
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.prevented
    }
}

/// A cancelable event together with its required delivery mode.
#[derive(Debug)]
pub struct Delivery<D> {
    /// How promptly the host must flush this event.
    pub mode: DeliveryMode,
    /// The event itself.
    pub event: Cancelable<D>,
}

impl<D> Delivery<D> {
    /// A delivery that must be flushed synchronously.
    pub const fn discrete(detail: D) -> Self {
        Self {
            mode: DeliveryMode::Discrete,
            event: Cancelable::new(detail),
        }
    }

    /// A delivery the host may route through its normal pipeline.
    pub const fn continuous(detail: D) -> Self {
        Self {
            mode: DeliveryMode::Continuous,
            event: Cancelable::new(detail),
        }
    }

    /// Runs a handler chain over the event and reports whether the default
    /// action was prevented.
    ///
    /// The handler is the whole chain: compose multiple consumers inside it,
    /// in order. Every consumer runs regardless of earlier `prevent_default`
    /// calls; prevention only affects the returned flag.
    pub fn handle(&mut self, handler: impl FnOnce(&mut Cancelable<D>)) -> bool {
        handler(&mut self.event);
        self.event.default_prevented()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_not_prevented() {
        let event = Cancelable::new(7_u32);
        assert!(!event.default_prevented());
        assert_eq!(event.detail, 7);
    }

    #[test]
    fn handle_reports_prevention() {
        let mut delivery = Delivery::continuous(());
        assert!(!delivery.handle(|_| {}));

        let mut delivery = Delivery::continuous(());
        assert!(delivery.handle(Cancelable::prevent_default));
    }

    #[test]
    fn all_handlers_in_chain_observe_event() {
        let mut delivery = Delivery::discrete(0_u32);
        let prevented = delivery.handle(|event| {
            event.detail += 1;
            event.prevent_default();
            // A later consumer in the chain still runs after prevention.
            event.detail += 1;
        });
        assert!(prevented);
        assert_eq!(delivery.event.detail, 2);
    }
}
