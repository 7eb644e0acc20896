// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emergent Surface: the abstract element-tree and input-environment seam.
//!
//! The Emergent crates coordinate overlay surfaces (dialogs, popovers, menus)
//! stacked on top of a shared element tree. They never render anything and
//! never own the tree; instead, the host exposes its tree and its focus and
//! input machinery through the traits in this crate:
//!
//! - [`SurfaceTree`]: read-only structural queries — containment, depth-first
//!   traversal, per-element [`ElementInfo`], computed-style visibility.
//! - [`FocusEnvironment`]: the active element, moving focus (with optional
//!   text selection and scroll suppression), and the root fallback.
//! - [`event`]: plain data types for the input notifications the host feeds
//!   into the overlay controllers (pointer-down, focus-in/out, key-down).
//! - [`dispatch`]: the cancelable-event delivery primitive shared by every
//!   controller, including the discrete-vs-continuous flush contract.
//!
//! All types are generic over a host-supplied element handle `K`, expected to
//! be a small `Copy + Eq` value (for example a generational node id). The
//! crates make no assumption about what `K` points at.
//!
//! ## Features
//!
//! - `mock`: enables the [`mock`] module, a reference in-memory surface used
//!   by the Emergent test suites and demos.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatch;
pub mod event;
#[cfg(feature = "mock")]
pub mod mock;
mod tree;

pub use tree::{
    ElementFlags, ElementInfo, ElementKind, FocusEnvironment, FocusOptions, SurfaceTree,
};
