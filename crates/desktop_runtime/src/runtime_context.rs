//! Provider and context wiring for the window registry.
//!
//! This module owns the long-lived registry signal, the effect queue, and the dispatch path.
//! Consumers reach it through [`use_window_manager`]; there is no registry outside a provider.

use leptos::*;
use thiserror::Error;
use window_registry::{
    can_close_window, reduce_registry, CycleDirection, RegisterWindowRequest, RegistryEffect,
    WindowAction, WindowId, WindowManagerConfig, WindowRegistry,
};

use crate::{effect_executor, host::WindowHostContext, keyboard};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Structural errors from wiring the window manager into a component tree.
pub enum WindowManagerError {
    /// The caller is not a descendant of [`WindowManagerProvider`].
    #[error("WindowManagerProvider missing in tree")]
    ProviderMissing,
}

#[derive(Clone, Copy)]
/// Leptos context for reading registry snapshots and dispatching [`WindowAction`] values.
pub struct WindowManagerContext {
    /// Host services that execute registry effects.
    pub host: StoredValue<WindowHostContext>,
    /// Rank bands, shake duration, and audio settings.
    pub config: StoredValue<WindowManagerConfig>,
    /// Latest registry snapshot. Only replaced when a transition changed it.
    pub state: RwSignal<WindowRegistry>,
    /// Effects emitted by the reducer that the executor has not run yet.
    pub effects: RwSignal<Vec<RegistryEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<WindowAction>,
}

impl WindowManagerContext {
    /// Builds a context and its signals in the current reactive scope.
    pub fn new(host: WindowHostContext, config: WindowManagerConfig) -> Self {
        let state = create_rw_signal(WindowRegistry::with_base_rank(config.base_rank));
        let effects = create_rw_signal(Vec::<RegistryEffect>::new());
        let host = store_value(host);
        let config = store_value(config);

        let dispatch = Callback::new(move |action: WindowAction| {
            let Some(mut registry) = state.try_get_untracked() else {
                return;
            };
            let previous = registry.clone();

            let Some(new_effects) =
                config.try_with_value(|config| reduce_registry(&mut registry, config, action))
            else {
                return;
            };

            if registry != previous {
                state.try_update(|current| *current = registry);
            }
            if !new_effects.is_empty() {
                effects.try_update(|queue| queue.extend(new_effects));
            }
        });

        Self {
            host,
            config,
            state,
            effects,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the context callback.
    ///
    /// Once the provider scope is disposed this is a no-op, so unregister calls from nested
    /// scopes and late timers during shell teardown are dropped.
    pub fn dispatch_action(&self, action: WindowAction) {
        if self.is_disposed() {
            return;
        }
        self.dispatch.call(action);
    }

    /// Whether the provider scope owning this context has been cleaned up.
    pub fn is_disposed(&self) -> bool {
        self.state.try_with_untracked(|_| ()).is_none()
    }

    /// Registers a window; a duplicate id is ignored.
    pub fn register(&self, request: RegisterWindowRequest) {
        self.dispatch_action(WindowAction::Register(request));
    }

    pub fn unregister(&self, window_id: impl Into<WindowId>) {
        self.dispatch_action(WindowAction::Unregister {
            window_id: window_id.into(),
        });
    }

    pub fn restore(&self, window_id: impl Into<WindowId>) {
        self.dispatch_action(WindowAction::Restore {
            window_id: window_id.into(),
        });
    }

    pub fn minimise(&self, window_id: impl Into<WindowId>) {
        self.dispatch_action(WindowAction::Minimise {
            window_id: window_id.into(),
        });
    }

    pub fn bring_to_front(&self, window_id: impl Into<WindowId>) {
        self.dispatch_action(WindowAction::BringToFront {
            window_id: window_id.into(),
        });
    }

    /// Returns whether a close request would be accepted. Unknown ids never block.
    pub fn can_close(&self, window_id: impl Into<WindowId>) -> bool {
        let window_id = window_id.into();
        self.state
            .with_untracked(|registry| can_close_window(registry, &window_id))
    }

    /// Closes the window if allowed and reports whether it was removed.
    ///
    /// A refused close starts the shake feedback and returns `false`; so does an unknown id.
    pub fn attempt_close(&self, window_id: impl Into<WindowId>) -> bool {
        let window_id = window_id.into();
        let allowed = self.state.with_untracked(|registry| {
            registry.contains(&window_id) && can_close_window(registry, &window_id)
        });
        self.dispatch_action(WindowAction::AttemptClose { window_id });
        allowed
    }

    pub fn trigger_shake(&self, window_id: impl Into<WindowId>) {
        self.dispatch_action(WindowAction::TriggerShake {
            window_id: window_id.into(),
        });
    }

    pub fn cycle_next(&self) {
        self.dispatch_action(WindowAction::CycleNext);
    }

    pub fn cycle_previous(&self) {
        self.dispatch_action(WindowAction::CyclePrevious);
    }

    pub fn cycle(&self, direction: CycleDirection) {
        match direction {
            CycleDirection::Next => self.cycle_next(),
            CycleDirection::Previous => self.cycle_previous(),
        }
    }

    /// Reserves a `window-<n>` id for a window without a stable name.
    pub fn allocate_window_id(&self) -> WindowId {
        // The counter is bookkeeping only; subscribers are not notified.
        self.state
            .try_update_untracked(|registry| registry.allocate_window_id())
            // Provider already disposed; nothing can collide with an id from an empty registry.
            .unwrap_or_else(|| WindowRegistry::default().allocate_window_id())
    }

    /// Reactive shake flag for `window_id`; `false` once the provider is gone.
    pub fn is_shaking(&self, window_id: &WindowId) -> bool {
        self.state
            .try_with(|registry| registry.is_shaking(window_id))
            .unwrap_or(false)
    }

    /// Returns a clone of the latest snapshot without tracking.
    pub fn snapshot(&self) -> WindowRegistry {
        self.state.get_untracked()
    }
}

#[component]
/// Provides [`WindowManagerContext`] to descendant components for the lifetime of the shell.
pub fn WindowManagerProvider(
    /// Rank and feedback settings; defaults apply when omitted.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    /// Injected host services; the platform default is used when omitted.
    #[prop(optional)]
    host: Option<WindowHostContext>,
    children: Children,
) -> impl IntoView {
    let runtime = WindowManagerContext::new(host.unwrap_or_default(), config.unwrap_or_default());

    provide_context(runtime);
    effect_executor::install(runtime);
    keyboard::install_cycle_shortcuts(runtime);

    children().into_view()
}

/// Returns the current [`WindowManagerContext`], or an error outside [`WindowManagerProvider`].
///
/// # Errors
///
/// Returns [`WindowManagerError::ProviderMissing`] when no provider is in scope.
pub fn try_use_window_manager() -> Result<WindowManagerContext, WindowManagerError> {
    use_context::<WindowManagerContext>().ok_or(WindowManagerError::ProviderMissing)
}

/// Returns the current [`WindowManagerContext`].
///
/// # Panics
///
/// Panics if called outside [`WindowManagerProvider`].
pub fn use_window_manager() -> WindowManagerContext {
    match try_use_window_manager() {
        Ok(runtime) => runtime,
        Err(err) => panic!("{err}"),
    }
}

/// Derived signal that is `true` while `window_id` plays the rejected-close shake.
pub fn use_window_shake(window_id: impl Into<WindowId>) -> Signal<bool> {
    let runtime = use_window_manager();
    let window_id = window_id.into();
    Signal::derive(move || runtime.is_shaking(&window_id))
}
