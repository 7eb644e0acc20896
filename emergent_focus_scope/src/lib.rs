// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emergent Focus Scope: focus containment for overlay surfaces.
//!
//! While an overlay (dialog, drawer) is open, keyboard focus should stay
//! inside it, land somewhere sensible on open, and go back where it came
//! from on close. This crate implements that per-region, coordinated:
//!
//! - [`FocusScope`]: the per-region controller — auto-focus on activation,
//!   trap maintenance while active, Tab wrapping at the tabbable edges,
//!   focus restoration on deactivation.
//! - [`ScopeStack`]: the shared registry that lets scopes nest. Activating
//!   a scope pauses the previous head, so only the innermost scope traps
//!   focus at a time.
//! - [`tabbable`]: the candidate computation — which descendants of a
//!   region participate in sequential focus, and which of those are
//!   actually visible.
//!
//! Like the layer crate, everything is host-driven: the host implements
//! the `emergent_surface` tree and focus traits, forwards its focus and
//! key events into the controller, and honors the controller's
//! prevent-default decisions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod tabbable;

mod focus;
mod scope;
mod stack;

pub use focus::{focus, focus_first, focus_optional};
pub use scope::{AutoFocus, FocusScope, FocusScopeOptions, ScopeHandlers};
pub use stack::{ScopeId, ScopeStack};
