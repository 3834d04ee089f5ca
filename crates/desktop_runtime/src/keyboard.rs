//! Ctrl+Tab window cycling.

use leptos::*;
use window_registry::CycleDirection;

use crate::runtime_context::WindowManagerContext;

/// Modifier/key snapshot of a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Maps Ctrl+Tab to [`CycleDirection::Next`] and Ctrl+Shift+Tab to [`CycleDirection::Previous`].
pub fn cycle_direction_for(chord: KeyChord<'_>) -> Option<CycleDirection> {
    if chord.key != "Tab" || !chord.ctrl || chord.alt || chord.meta {
        return None;
    }
    Some(if chord.shift {
        CycleDirection::Previous
    } else {
        CycleDirection::Next
    })
}

/// Binds the cycling shortcuts on the browser window for the lifetime of the current scope.
pub(crate) fn install_cycle_shortcuts(runtime: WindowManagerContext) {
    let listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let key = ev.key();
        let chord = KeyChord {
            key: &key,
            ctrl: ev.ctrl_key(),
            shift: ev.shift_key(),
            alt: ev.alt_key(),
            meta: ev.meta_key(),
        };
        if let Some(direction) = cycle_direction_for(chord) {
            // Keep the browser from switching tabs.
            ev.prevent_default();
            ev.stop_propagation();
            runtime.cycle(direction);
        }
    });
    on_cleanup(move || listener.remove());
}
