//! Leptos provider scope for the window registry.
//!
//! [`WindowManagerProvider`] owns one [`window_registry::WindowRegistry`] signal for the lifetime
//! of the shell, runs reducer effects through injectable host services, and binds Ctrl+Tab
//! cycling. Window components register through [`use_window_registration`].

pub mod effect_executor;
pub mod host;
pub mod keyboard;
pub mod registration;
pub mod runtime_context;

pub use host::{
    window_dom_id, BrowserTimerService, ManualTimerService, NoopSoundFxService,
    QueuedSoundFxService, SoundFxService, TimerService, WindowHostContext,
};
pub use keyboard::{cycle_direction_for, KeyChord};
pub use registration::{use_anonymous_window, use_window_registration, WindowRegistrationHandle};
pub use runtime_context::{
    try_use_window_manager, use_window_manager, use_window_shake, WindowManagerContext,
    WindowManagerError, WindowManagerProvider,
};
pub use window_registry;
