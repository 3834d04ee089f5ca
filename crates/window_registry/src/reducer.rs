//! Reducer actions, side-effect intents, and transition logic for the window registry.

use std::time::Duration;

use crate::{
    config::WindowManagerConfig,
    model::{RegisterWindowRequest, WindowId, WindowRegistry},
    window_manager::{
        attempt_close_window, bring_window_to_front, clear_window_shake, cycle_window_focus,
        minimise_window, register_window, restore_window, trigger_window_shake, unregister_window,
        CloseOutcome, CycleDirection,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_registry`] to mutate [`WindowRegistry`].
pub enum WindowAction {
    /// Register a window; duplicates are ignored.
    Register(RegisterWindowRequest),
    /// Remove a window.
    Unregister {
        /// Window to remove.
        window_id: WindowId,
    },
    /// Activate a window without changing its rank.
    Restore {
        /// Window to activate.
        window_id: WindowId,
    },
    /// Deactivate a window.
    Minimise {
        /// Window to deactivate.
        window_id: WindowId,
    },
    /// Raise and activate a window.
    BringToFront {
        /// Window to raise.
        window_id: WindowId,
    },
    /// Close a window if its policy allows, otherwise shake it.
    AttemptClose {
        /// Window to close.
        window_id: WindowId,
    },
    /// Start the rejected-action shake on a window.
    TriggerShake {
        /// Window to shake.
        window_id: WindowId,
    },
    /// Timer callback ending a shake started with `generation`.
    ClearShake {
        /// Window whose shake ended.
        window_id: WindowId,
        /// Generation returned when the shake was triggered.
        generation: u64,
    },
    /// Focus the next top-level window.
    CycleNext,
    /// Focus the previous top-level window.
    CyclePrevious,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_registry`] for the runtime to execute.
pub enum RegistryEffect {
    /// Dispatch [`WindowAction::ClearShake`] after `delay`.
    ScheduleShakeReset {
        /// Shaking window.
        window_id: WindowId,
        /// Generation the reset must present.
        generation: u64,
        /// Delay before the reset fires.
        delay: Duration,
    },
    /// A close request was refused by the window's policy.
    CloseRejected {
        /// Window that refused to close.
        window_id: WindowId,
        /// Title at the time of the request.
        title: String,
    },
    /// Play a named UI sound effect.
    PlaySound(String),
    /// Move input focus into the newly focused window.
    FocusWindowInput(WindowId),
}

/// Applies a [`WindowAction`] to the registry and collects resulting side effects.
///
/// Actions that reference a missing id leave the registry untouched and emit nothing.
pub fn reduce_registry(
    registry: &mut WindowRegistry,
    config: &WindowManagerConfig,
    action: WindowAction,
) -> Vec<RegistryEffect> {
    let mut effects = Vec::new();
    match action {
        WindowAction::Register(req) => {
            let window_id = req.id.clone();
            let critical = req.kind.is_critical();
            if register_window(registry, config, req) && critical {
                effects.push(RegistryEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::Unregister { window_id } => {
            unregister_window(registry, &window_id);
        }
        WindowAction::Restore { window_id } => {
            if restore_window(registry, &window_id) {
                effects.push(RegistryEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::Minimise { window_id } => {
            minimise_window(registry, &window_id);
        }
        WindowAction::BringToFront { window_id } => {
            if bring_window_to_front(registry, config, &window_id) {
                effects.push(RegistryEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::AttemptClose { window_id } => {
            let title = registry
                .entry(&window_id)
                .map(|entry| entry.title.clone())
                .unwrap_or_default();
            if let CloseOutcome::Rejected { generation } =
                attempt_close_window(registry, &window_id)
            {
                effects.push(RegistryEffect::CloseRejected {
                    window_id: window_id.clone(),
                    title,
                });
                push_shake_effects(&mut effects, config, window_id, generation);
            }
        }
        WindowAction::TriggerShake { window_id } => {
            if let Some(generation) = trigger_window_shake(registry, &window_id) {
                push_shake_effects(&mut effects, config, window_id, generation);
            }
        }
        WindowAction::ClearShake {
            window_id,
            generation,
        } => {
            clear_window_shake(registry, &window_id, generation);
        }
        WindowAction::CycleNext => {
            if let Some(window_id) = cycle_window_focus(registry, config, CycleDirection::Next) {
                effects.push(RegistryEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::CyclePrevious => {
            if let Some(window_id) = cycle_window_focus(registry, config, CycleDirection::Previous)
            {
                effects.push(RegistryEffect::FocusWindowInput(window_id));
            }
        }
    }
    effects
}

fn push_shake_effects(
    effects: &mut Vec<RegistryEffect>,
    config: &WindowManagerConfig,
    window_id: WindowId,
    generation: u64,
) {
    if config.audio_enabled {
        effects.push(RegistryEffect::PlaySound(config.error_sound.clone()));
    }
    effects.push(RegistryEffect::ScheduleShakeReset {
        window_id,
        generation,
        delay: config.shake_duration(),
    });
}
