//! Host-side services for executing registry effects.
//!
//! Timers and sound playback sit behind trait objects so the provider can run in a browser, in a
//! headless host, or under test with a virtual clock.

mod sound_fx;
mod timers;

use std::rc::Rc;

use leptos::logging;
use window_registry::{RegistryEffect, WindowAction, WindowId};

pub use sound_fx::{NoopSoundFxService, QueuedSoundFxService, SoundFxService};
pub use timers::{BrowserTimerService, ManualTimerService, TimerCallback, TimerService};

use crate::runtime_context::WindowManagerContext;

/// DOM id a window frame renders so focus can be moved into it.
pub fn window_dom_id(window_id: &WindowId) -> String {
    format!("window-frame-{window_id}")
}

#[derive(Clone)]
/// Host service bundle for registry side effects.
pub struct WindowHostContext {
    timers: Rc<dyn TimerService>,
    sound_fx: Rc<dyn SoundFxService>,
}

impl Default for WindowHostContext {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        let timers: Rc<dyn TimerService> = Rc::new(BrowserTimerService);
        #[cfg(not(target_arch = "wasm32"))]
        let timers: Rc<dyn TimerService> = Rc::new(ManualTimerService::default());

        Self {
            timers,
            sound_fx: Rc::new(NoopSoundFxService),
        }
    }
}

impl WindowHostContext {
    /// Replaces the timer service.
    pub fn with_timers(mut self, timers: impl TimerService + 'static) -> Self {
        self.timers = Rc::new(timers);
        self
    }

    /// Replaces the sound-effect service.
    pub fn with_sound_fx(mut self, sound_fx: impl SoundFxService + 'static) -> Self {
        self.sound_fx = Rc::new(sound_fx);
        self
    }

    /// Returns the configured timer service.
    pub fn timers(&self) -> Rc<dyn TimerService> {
        self.timers.clone()
    }

    /// Returns the configured sound-effect service.
    pub fn sound_fx(&self) -> Rc<dyn SoundFxService> {
        self.sound_fx.clone()
    }

    /// Executes a single [`RegistryEffect`] emitted by the reducer.
    pub fn run_registry_effect(&self, runtime: WindowManagerContext, effect: RegistryEffect) {
        match effect {
            RegistryEffect::ScheduleShakeReset {
                window_id,
                generation,
                delay,
            } => self.timers.schedule(
                delay,
                Box::new(move || {
                    runtime.dispatch_action(WindowAction::ClearShake {
                        window_id,
                        generation,
                    })
                }),
            ),
            RegistryEffect::CloseRejected { window_id, title } => {
                logging::warn!("cannot close {title} ({window_id}): required action pending");
            }
            RegistryEffect::PlaySound(name) => self.sound_fx.play(&name),
            RegistryEffect::FocusWindowInput(window_id) => self.focus_window_input(&window_id),
        }
    }

    /// Moves keyboard focus onto the frame element of `window_id`, if it is rendered.
    pub fn focus_window_input(&self, window_id: &WindowId) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            let Some(element) = document.get_element_by_id(&window_dom_id(window_id)) else {
                return;
            };
            if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                let _ = element.focus();
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = window_id;
    }
}
