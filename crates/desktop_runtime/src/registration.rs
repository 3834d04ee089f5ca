//! Mount/unmount pairing between window components and the registry.

use std::cell::Cell;

use leptos::*;
use window_registry::{RegisterWindowRequest, WindowId, WindowTemplate};

use crate::runtime_context::{use_window_manager, WindowManagerContext};

/// Registers a window for the lifetime of the calling component.
///
/// The entry is unregistered when the owning reactive scope is cleaned up.
pub fn use_window_registration(request: RegisterWindowRequest) -> WindowId {
    let runtime = use_window_manager();
    let window_id = request.id.clone();
    runtime.register(request);

    let cleanup_id = window_id.clone();
    on_cleanup(move || runtime.unregister(cleanup_id));
    window_id
}

/// Registers a window under a freshly allocated id and returns that id.
pub fn use_anonymous_window(template: WindowTemplate) -> WindowId {
    let runtime = use_window_manager();
    let window_id = runtime.allocate_window_id();
    use_window_registration(template.into_request(window_id))
}

/// Drop-based registration handle for callers outside a component scope.
pub struct WindowRegistrationHandle {
    runtime: WindowManagerContext,
    window_id: WindowId,
    active: Cell<bool>,
}

impl WindowRegistrationHandle {
    pub fn window_id(&self) -> &WindowId {
        &self.window_id
    }

    /// Unregisters the window if this handle still owns the registration.
    pub fn unregister(&self) {
        if self.active.replace(false) {
            self.runtime.unregister(self.window_id.clone());
        }
    }
}

impl Drop for WindowRegistrationHandle {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl WindowManagerContext {
    /// Registers a window and returns a handle that unregisters it on drop.
    pub fn register_scoped(&self, request: RegisterWindowRequest) -> WindowRegistrationHandle {
        let window_id = request.id.clone();
        self.register(request);
        WindowRegistrationHandle {
            runtime: *self,
            window_id,
            active: Cell::new(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use window_registry::WindowManagerConfig;

    use super::*;
    use crate::host::WindowHostContext;

    #[test]
    fn handle_unregisters_on_drop_and_only_once() {
        let _ = leptos::create_runtime();
        let runtime =
            WindowManagerContext::new(WindowHostContext::default(), WindowManagerConfig::default());

        let handle = runtime.register_scoped(RegisterWindowRequest::new("tracks", "Tracks"));
        assert_eq!(runtime.snapshot().len(), 1);

        handle.unregister();
        assert!(runtime.snapshot().is_empty());

        runtime.register(RegisterWindowRequest::new("tracks", "Tracks again"));
        drop(handle);
        assert_eq!(runtime.snapshot().len(), 1);
    }

    #[test]
    fn dropping_handle_runs_teardown_on_early_exit() {
        let _ = leptos::create_runtime();
        let runtime =
            WindowManagerContext::new(WindowHostContext::default(), WindowManagerConfig::default());

        let render = |fail: bool| -> Result<(), &'static str> {
            let _handle = runtime.register_scoped(RegisterWindowRequest::new("preview", "Preview"));
            if fail {
                return Err("render failed");
            }
            Ok(())
        };

        assert!(render(true).is_err());
        assert!(runtime.snapshot().is_empty());
    }

    #[test]
    fn window_scope_cleanup_unregisters() {
        let _ = leptos::create_runtime();
        let runtime =
            WindowManagerContext::new(WindowHostContext::default(), WindowManagerConfig::default());
        provide_context(runtime);

        let (window_id, disposer) = as_child_of_current_owner(|_: ()| {
            use_window_registration(RegisterWindowRequest::new("tracks", "Tracks"))
        })(());
        assert!(runtime.snapshot().contains(&window_id));

        drop(disposer);
        assert!(runtime.snapshot().is_empty());
    }

    #[test]
    fn provider_teardown_with_nested_window_scope_completes() {
        let _ = leptos::create_runtime();
        let (runtime, disposer) = as_child_of_current_owner(|_: ()| {
            let runtime = WindowManagerContext::new(
                WindowHostContext::default(),
                WindowManagerConfig::default(),
            );
            provide_context(runtime);
            create_effect(|_| {
                use_window_registration(RegisterWindowRequest::new("tracks", "Tracks"));
            });
            runtime
        })(());
        assert_eq!(runtime.snapshot().len(), 1);

        drop(disposer);

        assert!(runtime.is_disposed());
    }

    #[test]
    fn anonymous_window_registers_under_allocated_id() {
        let _ = leptos::create_runtime();
        let runtime =
            WindowManagerContext::new(WindowHostContext::default(), WindowManagerConfig::default());
        provide_context(runtime);

        let window_id = use_anonymous_window(WindowTemplate::new("Profile"));

        assert_eq!(window_id, WindowId::from("window-1"));
        let snapshot = runtime.snapshot();
        assert_eq!(snapshot.entry(&window_id).map(|e| e.title.as_str()), Some("Profile"));
    }
}
