// Copyright 2026 the Emergent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus trapping and restoration.
//!
//! Open a trapped, wrapping focus scope over a mock surface: auto-focus on
//! activation, pull-back when focus strays, Tab wrapping at the edges, and
//! restoration to the previously focused element on deactivation.
//!
//! Run:
//! - `cargo run -p emergent_demos --example focus_trap`

use emergent_focus_scope::{FocusScope, FocusScopeOptions, ScopeStack};
use emergent_surface::event::{FocusIn, Key, KeyDown};
use emergent_surface::mock::MockSurface;
use emergent_surface::{ElementKind, FocusEnvironment, FocusOptions};

fn main() {
    // A page with a trigger button and a dialog holding three fields.
    let mut surface = MockSurface::new();
    surface.insert(1, None); // trigger button
    surface.set_tab_index(1, 0);
    surface.insert(10, None); // dialog container
    for field in [11, 12, 13] {
        surface.insert(field, Some(10));
        surface.set_tab_index(field, 0);
    }
    surface.set_kind(11, ElementKind::TextEntry);

    // Focus starts on the trigger.
    surface.focus(1, FocusOptions::default());
    println!("focus before open: {:?}", surface.active_element());

    let mut stack = ScopeStack::new();
    let mut scope = FocusScope::new(
        &mut stack,
        FocusScopeOptions {
            trapped: true,
            wrap: true,
        },
    );

    // Opening the dialog auto-focuses its first field, selecting its text.
    let tree = surface.clone();
    scope.activate(10, &tree, &mut surface, &mut stack, &mut ());
    println!(
        "opened: focus = {:?}, selected = {:?}",
        surface.active_element(),
        surface.last_selected()
    );
    assert_eq!(surface.active_element(), Some(11));

    // Focus straying outside is pulled straight back.
    surface.focus(1, FocusOptions::default());
    let tree = surface.clone();
    scope.on_document_focus_in(&tree, &mut surface, &stack, FocusIn { target: 1 });
    println!("after stray focus: {:?}", surface.active_element());
    assert_eq!(surface.active_element(), Some(11));

    // Tab from the last field wraps around to the first.
    surface.focus(13, FocusOptions::default());
    let tree = surface.clone();
    let prevented = scope.on_key_down(&tree, &mut surface, &stack, &KeyDown::unmodified(Key::Tab));
    println!(
        "Tab at last field: prevented = {prevented}, focus = {:?}",
        surface.active_element()
    );
    assert_eq!(surface.active_element(), Some(11));

    // Closing the dialog restores focus to the trigger.
    let tree = surface.clone();
    scope.deactivate(&tree, &mut surface, &mut stack, &mut ());
    println!("closed: focus = {:?}", surface.active_element());
    assert_eq!(surface.active_element(), Some(1));
}
