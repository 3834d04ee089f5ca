//! Window registry and stacking controller for the desktop shell.
//!
//! The registry tracks which logical windows exist, which one holds focus, their paint order,
//! and the transient shake feedback shown when a close request is refused. All mutation goes
//! through [`reduce_registry`], which returns [`RegistryEffect`] intents for the host runtime to
//! execute. Nothing here depends on a UI framework.

pub mod config;
pub mod model;
pub mod reducer;
pub mod views;
pub mod window_manager;

pub use config::{ConfigError, StackBands, WindowManagerConfig};
pub use model::*;
pub use reducer::{reduce_registry, RegistryEffect, WindowAction};
pub use views::{TaskbarTab, WindowNode};
pub use window_manager::{can_close_window, cycle_target, CloseOutcome, CycleDirection};
