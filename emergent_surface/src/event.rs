// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input notification payloads fed into the overlay controllers.
//!
//! These are plain data types: the host observes its native input events at
//! document scope (with capture-phase ordering available) and forwards them
//! as these values. No handle resolution or hit testing happens here.

bitflags::bitflags! {
    /// Keyboard modifier state accompanying a [`KeyDown`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0000_0001;
        /// Control key held.
        const CTRL  = 0b0000_0010;
        /// Alt/Option key held.
        const ALT   = 0b0000_0100;
        /// Meta/Command key held.
        const META  = 0b0000_1000;
    }
}

/// Kind of pointing device behind a pointer event.
///
/// Touch pointers get special dismissal treatment: the browser-style delay
/// between lifting a finger and the synthesized click means outside dismissal
/// must be deferred to the click, see
/// `emergent_layers`' pointer-outside detector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse-like device.
    Mouse,
    /// A stylus.
    Pen,
    /// A touch contact.
    Touch,
}

/// A document-level pointer-down notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerDown<K> {
    /// The element under the pointer.
    pub target: K,
    /// The device kind that produced the event.
    pub pointer_type: PointerType,
}

/// A document-level focus-in notification (focus landed on `target`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusIn<K> {
    /// The element that received focus.
    pub target: K,
}

/// A document-level focus-out notification (focus is leaving `target`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusOut<K> {
    /// The element losing focus.
    pub target: K,
    /// The element about to receive focus, when the host knows it.
    pub related: Option<K>,
}

/// Key identity for the keys the overlay engine reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// The Tab key.
    Tab,
    /// Any other key.
    Other,
}

/// A document-level key-down notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyDown {
    /// Which key went down.
    pub key: Key,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
}

impl KeyDown {
    /// A plain, unmodified key press.
    pub const fn unmodified(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmodified_has_no_modifiers() {
        let key = KeyDown::unmodified(Key::Escape);
        assert_eq!(key.key, Key::Escape);
        assert!(key.modifiers.is_empty());
    }
}
