//! Runs reducer-emitted registry effects against the host services.

use leptos::*;

use crate::runtime_context::WindowManagerContext;

/// Re-runs [`drain_pending`] whenever the reducer appends to the effect queue.
pub fn install(runtime: WindowManagerContext) {
    create_effect(move |_| {
        runtime.effects.track();
        drain_pending(runtime);
    });
}

/// Takes the queued effects and runs them in emission order.
///
/// The queue is emptied before any effect runs, so effects that dispatch again start a fresh batch.
pub fn drain_pending(runtime: WindowManagerContext) {
    let queued = runtime
        .effects
        .try_update_untracked(std::mem::take)
        .unwrap_or_default();
    if queued.is_empty() {
        return;
    }

    let Some(host) = runtime.host.try_get_value() else {
        return;
    };
    for effect in queued {
        host.run_registry_effect(runtime, effect);
    }
}
