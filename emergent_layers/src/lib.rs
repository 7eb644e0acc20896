// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emergent Layers: coordination of stacked, dismissable overlay surfaces.
//!
//! Any number of overlay surfaces (dialogs, popovers, menus) can be mounted
//! at once over one element tree. This crate decides which of them reacts to
//! a given interaction and when one should dismiss itself:
//!
//! - [`LayerStack`]: the shared registry — the ordered set of mounted
//!   layers, the subset requesting exclusive pointer input, and the branch
//!   regions exempt from outside-dismissal. Mount order is the sole ranking
//!   signal.
//! - [`outside`]: two independent detectors that watch document-level input
//!   and report interactions landing outside a flagged region — one for
//!   pointer-downs (with touch-to-click deferral), one for focus moves.
//! - [`DismissableLayer`]: the per-surface controller. It registers itself
//!   with the stack, owns its detectors, gates every potential dismissal on
//!   the stack's eligibility queries, and drives the caller's
//!   [`DismissHandlers`].
//!
//! ## Shape
//!
//! Everything is host-driven: the host forwards its document-level input
//! events into controller methods and applies the returned effect values
//! ([`MountUpdate`], [`UnmountUpdate`], the pointer-events override). The
//! stack is a plain owned value passed `&mut` where needed — embedders with
//! several independent roots simply keep several stacks.
//!
//! ## Minimal example
//!
//! ```
//! use emergent_layers::{DismissableLayer, LayerOptions, LayerStack};
//! use emergent_surface::event::{Key, KeyDown};
//! use emergent_surface::mock::MockSurface;
//!
//! let mut surface = MockSurface::new();
//! surface.insert(1, None); // the overlay element
//!
//! let mut stack = LayerStack::new();
//! let mut layer = DismissableLayer::new(LayerOptions::default());
//! layer.attach(1, &mut stack);
//!
//! // Track dismissal through the handler trait.
//! #[derive(Default)]
//! struct Nothing {
//!     dismissed: bool,
//! }
//! impl emergent_layers::DismissHandlers<u32> for Nothing {
//!     fn on_dismiss(&mut self) {
//!         self.dismissed = true;
//!     }
//! }
//!
//! let mut handlers = Nothing::default();
//! layer.on_document_key_down(
//!     &stack,
//!     KeyDown::unmodified(Key::Escape),
//!     &mut handlers,
//! );
//! assert!(handlers.dismissed);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod outside;

mod layer;
mod stack;

pub use layer::{DismissHandlers, DismissableLayer, LayerOptions, OutsideDetail};
pub use stack::{
    ExclusiveUpdate, LayerStack, MountUpdate, PointerEvents, StackTrace, UnmountUpdate,
};
