// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked dismissable layers.
//!
//! Mount a dialog and a popover over a mock surface, then walk through the
//! interactions that dismiss them: Escape targets the topmost layer only,
//! outside pointer-downs respect exclusivity masking, and branch regions
//! are exempt.
//!
//! Run:
//! - `cargo run -p emergent_demos --example dismiss_layers`

use emergent_layers::{DismissHandlers, DismissableLayer, LayerOptions, LayerStack};
use emergent_surface::event::{Key, KeyDown, PointerDown, PointerType};
use emergent_surface::mock::MockSurface;

struct Named {
    name: &'static str,
    dismissed: bool,
}

impl Named {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            dismissed: false,
        }
    }
}

impl DismissHandlers<u32> for Named {
    fn on_dismiss(&mut self) {
        println!("  -> {} dismissed", self.name);
        self.dismissed = true;
    }
}

fn main() {
    // A page with a button, a modal dialog, a popover over it, and a
    // toolbar registered as a branch (never "outside" for any layer).
    let mut surface = MockSurface::new();
    surface.insert(1, None); // page body content
    surface.insert(10, None); // dialog
    surface.insert(20, None); // popover
    surface.insert(30, None); // toolbar (branch)

    let mut stack = LayerStack::new();
    stack.add_branch(30);

    // The dialog is modal: it disables pointer input everywhere below it.
    let mut dialog = DismissableLayer::new(LayerOptions {
        disable_outside_pointer_events: true,
    });
    let mut popover = DismissableLayer::new(LayerOptions::default());

    let update = dialog.attach(10, &mut stack);
    println!(
        "dialog mounted (snapshot body pointer-events: {})",
        update.snapshot_body_pointer_events
    );
    popover.attach(20, &mut stack);
    println!("popover mounted");

    // Arm the outside detectors on the next input turn.
    dialog.tick();
    popover.tick();

    let mut dialog_handlers = Named::new("dialog");
    let mut popover_handlers = Named::new("popover");

    // Escape reaches only the topmost layer.
    println!("press Escape:");
    let escape = KeyDown::unmodified(Key::Escape);
    dialog.on_document_key_down(&stack, escape, &mut dialog_handlers);
    popover.on_document_key_down(&stack, escape, &mut popover_handlers);
    assert!(!dialog_handlers.dismissed && popover_handlers.dismissed);
    popover.detach(&mut stack);

    // A pointer-down on the toolbar branch dismisses nothing.
    println!("click the toolbar branch:");
    let on_branch = PointerDown {
        target: 30,
        pointer_type: PointerType::Mouse,
    };
    dialog.on_document_pointer_down(&stack, &surface, on_branch, &mut dialog_handlers);
    assert!(!dialog_handlers.dismissed);
    println!("  -> nothing dismissed");

    // A pointer-down on the page body dismisses the dialog.
    println!("click the page body:");
    let on_body = PointerDown {
        target: 1,
        pointer_type: PointerType::Mouse,
    };
    dialog.on_document_pointer_down(&stack, &surface, on_body, &mut dialog_handlers);
    assert!(dialog_handlers.dismissed);

    let update = dialog.detach(&mut stack);
    println!(
        "dialog unmounted (restore body pointer-events: {})",
        update.restore_body_pointer_events
    );
    assert!(stack.is_empty());
}
