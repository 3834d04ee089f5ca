//! Registry transition helpers used by the reducer.
//!
//! Every helper treats an unknown id as a no-op and reports whether it changed anything, so a
//! stale callback racing an unregister can never fail or resurrect an entry.

use serde::{Deserialize, Serialize};

use crate::{
    config::WindowManagerConfig,
    model::{RegisterWindowRequest, WindowEntry, WindowId, WindowKind, WindowRegistry},
};

/// Direction for keyboard focus cycling over top-level windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleDirection {
    Next,
    Previous,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The entry was removed.
    Closed,
    /// The entry is not closable; a shake with `generation` was started.
    Rejected {
        /// Generation of the shake trigger started by the rejection.
        generation: u64,
    },
    /// No entry with that id exists.
    NotFound,
}

impl CloseOutcome {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Computes the initial rank for a newly registered window of `kind`.
///
/// Normal windows consume `next_rank`; banded tiers do not touch it.
pub fn initial_stack_order(
    registry: &mut WindowRegistry,
    config: &WindowManagerConfig,
    kind: WindowKind,
) -> u32 {
    match kind {
        WindowKind::System => config.bands.system,
        WindowKind::Modal => config.bands.modal,
        WindowKind::Menu => config.bands.menu,
        WindowKind::Normal => {
            let rank = registry.next_rank;
            registry.next_rank = registry.next_rank.saturating_add(config.normal_rank_step);
            rank
        }
    }
}

/// Inserts a new entry unless the id is already registered.
///
/// Returns `true` when an entry was inserted.
pub fn register_window(
    registry: &mut WindowRegistry,
    config: &WindowManagerConfig,
    req: RegisterWindowRequest,
) -> bool {
    if registry.contains(&req.id) {
        return false;
    }

    let stack_order = match req.stack_order.filter(|rank| *rank > 0) {
        Some(rank) => rank,
        None => initial_stack_order(registry, config, req.kind),
    };

    registry.entries.push(WindowEntry {
        id: req.id,
        title: req.title,
        parent_id: req.parent_id,
        kind: req.kind,
        closable: req.closable,
        active: req.kind.is_critical(),
        stack_order,
        icon_id: req.icon_id,
        position: req.position,
    });
    true
}

/// Removes an entry along with its focus and shake bookkeeping.
///
/// Children of the removed entry stay registered.
pub fn unregister_window(registry: &mut WindowRegistry, window_id: &WindowId) -> bool {
    let before_len = registry.entries.len();
    registry.entries.retain(|w| &w.id != window_id);
    if registry.active_id.as_ref() == Some(window_id) {
        registry.active_id = None;
    }
    registry.shaking.remove(window_id);
    registry.entries.len() != before_len
}

/// Activates `window_id` and deactivates every other top-level entry.
pub fn restore_window(registry: &mut WindowRegistry, window_id: &WindowId) -> bool {
    if !registry.contains(window_id) {
        return false;
    }

    for entry in &mut registry.entries {
        if &entry.id == window_id {
            entry.active = true;
        } else if entry.is_top_level() {
            entry.active = false;
        }
    }
    registry.active_id = Some(window_id.clone());
    true
}

pub fn minimise_window(registry: &mut WindowRegistry, window_id: &WindowId) -> bool {
    let Some(entry) = registry.entry_mut(window_id) else {
        return false;
    };
    entry.active = false;
    if registry.active_id.as_ref() == Some(window_id) {
        registry.active_id = None;
    }
    true
}

/// Raises `window_id` above every other entry and makes it the sole active window.
pub fn bring_window_to_front(
    registry: &mut WindowRegistry,
    config: &WindowManagerConfig,
    window_id: &WindowId,
) -> bool {
    let Some(top) = registry.highest_stack_order() else {
        return false;
    };
    if !registry.contains(window_id) {
        return false;
    }

    let rank = match top.checked_add(config.raise_step) {
        Some(rank) => rank,
        None => normalize_stack_orders(registry, config).saturating_add(config.raise_step),
    };
    for entry in &mut registry.entries {
        if &entry.id == window_id {
            entry.active = true;
            entry.stack_order = rank;
        } else {
            entry.active = false;
        }
    }
    registry.active_id = Some(window_id.clone());
    registry.next_rank = registry.next_rank.saturating_add(config.raise_rank_advance);
    true
}

/// Reassigns ranks from `config.base_rank` upward in paint order, keeping relative order.
///
/// Used when a raise would overflow the rank space. Returns the new highest rank.
fn normalize_stack_orders(registry: &mut WindowRegistry, config: &WindowManagerConfig) -> u32 {
    let mut paint_order: Vec<usize> = (0..registry.entries.len()).collect();
    paint_order.sort_by_key(|&idx| registry.entries[idx].stack_order);

    let mut top = config.base_rank;
    for (position, idx) in paint_order.into_iter().enumerate() {
        let step = u32::try_from(position)
            .unwrap_or(u32::MAX)
            .saturating_mul(config.raise_step);
        top = config.base_rank.saturating_add(step);
        registry.entries[idx].stack_order = top;
    }
    registry.next_rank = top.saturating_add(config.normal_rank_step);
    top
}

/// Missing entries never block a close.
pub fn can_close_window(registry: &WindowRegistry, window_id: &WindowId) -> bool {
    registry
        .entry(window_id)
        .map(|entry| entry.closable)
        .unwrap_or(true)
}

pub fn attempt_close_window(registry: &mut WindowRegistry, window_id: &WindowId) -> CloseOutcome {
    if !registry.contains(window_id) {
        return CloseOutcome::NotFound;
    }

    if !can_close_window(registry, window_id) {
        return match trigger_window_shake(registry, window_id) {
            Some(generation) => CloseOutcome::Rejected { generation },
            None => CloseOutcome::NotFound,
        };
    }

    unregister_window(registry, window_id);
    CloseOutcome::Closed
}

/// Marks `window_id` as shaking and returns the generation the reset timer must present.
///
/// Retriggering bumps the generation so older timers no longer clear the flag.
pub fn trigger_window_shake(registry: &mut WindowRegistry, window_id: &WindowId) -> Option<u64> {
    if !registry.contains(window_id) {
        return None;
    }
    let generation = registry.next_shake_generation;
    registry.next_shake_generation = registry.next_shake_generation.saturating_add(1);
    registry.shaking.insert(window_id.clone(), generation);
    Some(generation)
}

/// Clears the shake flag only if `generation` is the latest trigger for that id.
pub fn clear_window_shake(
    registry: &mut WindowRegistry,
    window_id: &WindowId,
    generation: u64,
) -> bool {
    if registry.shaking.get(window_id) != Some(&generation) {
        return false;
    }
    registry.shaking.remove(window_id);
    true
}

/// Picks the top-level window that `direction` moves focus to, without mutating anything.
pub fn cycle_target(registry: &WindowRegistry, direction: CycleDirection) -> Option<WindowId> {
    let top_level: Vec<&WindowEntry> = registry.top_level().collect();
    if top_level.is_empty() {
        return None;
    }

    let len = top_level.len();
    let current = registry
        .active_id
        .as_ref()
        .and_then(|active| top_level.iter().position(|w| &w.id == active));
    let index = match (direction, current) {
        (CycleDirection::Next, Some(index)) => (index + 1) % len,
        (CycleDirection::Next, None) => 0,
        (CycleDirection::Previous, Some(0)) | (CycleDirection::Previous, None) => len - 1,
        (CycleDirection::Previous, Some(index)) => index - 1,
    };
    Some(top_level[index].id.clone())
}

/// Moves focus to the next/previous top-level window and raises it.
pub fn cycle_window_focus(
    registry: &mut WindowRegistry,
    config: &WindowManagerConfig,
    direction: CycleDirection,
) -> Option<WindowId> {
    let target = cycle_target(registry, direction)?;
    bring_window_to_front(registry, config, &target).then_some(target)
}
