//! One-shot timer services backing the shake-reset schedule.

use std::{cell::RefCell, rc::Rc, time::Duration};

use leptos::logging;

/// Deferred callback accepted by [`TimerService::schedule`].
pub type TimerCallback = Box<dyn FnOnce()>;

/// Host service that runs a callback once after a delay on the UI event loop.
pub trait TimerService {
    /// Schedules `callback` to run once after `delay`.
    fn schedule(&self, delay: Duration, callback: TimerCallback);
}

#[derive(Debug, Clone, Copy, Default)]
/// `setTimeout`-backed timers for browser hosts.
pub struct BrowserTimerService;

impl TimerService for BrowserTimerService {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        if let Err(err) = leptos::set_timeout_with_handle(callback, delay) {
            logging::warn!("timer schedule failed: {err:?}");
        }
    }
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualTimerState {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

#[derive(Clone, Default)]
/// Virtual-clock timers that only fire when [`ManualTimerService::advance`] is called.
///
/// Used by headless hosts and tests where there is no browser event loop.
pub struct ManualTimerService {
    state: Rc<RefCell<ManualTimerState>>,
}

impl ManualTimerService {
    /// Moves the virtual clock forward and runs every callback that became due, in due order.
    ///
    /// Callbacks may schedule further timers; those fire in the same call if they fall due.
    pub fn advance(&self, elapsed: Duration) {
        let target = {
            let mut state = self.state.borrow_mut();
            state.now = state.now.saturating_add(elapsed);
            state.now
        };

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due_index = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                due_index.map(|index| state.pending.remove(index))
            };
            let Some(timer) = next else {
                break;
            };
            (timer.callback)();
        }
    }

    /// Number of callbacks that have not fired yet.
    pub fn pending_len(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl TimerService for ManualTimerService {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        let mut state = self.state.borrow_mut();
        let seq = state.next_seq;
        state.next_seq = state.next_seq.saturating_add(1);
        let due = state.now.saturating_add(delay);
        state.pending.push(PendingTimer { due, seq, callback });
    }
}
