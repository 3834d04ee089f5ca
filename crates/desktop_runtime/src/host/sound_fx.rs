//! UI sound-effect sinks.

use std::{cell::RefCell, rc::Rc};

/// Host service that plays named UI sound effects.
pub trait SoundFxService {
    /// Plays (or enqueues) the sound named `name`.
    fn play(&self, name: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sound service for hosts without audio output.
pub struct NoopSoundFxService;

impl SoundFxService for NoopSoundFxService {
    fn play(&self, _name: &str) {}
}

#[derive(Debug, Clone, Default)]
/// FIFO of requested sound names, drained by whichever audio player owns playback.
pub struct QueuedSoundFxService {
    queue: Rc<RefCell<Vec<String>>>,
}

impl QueuedSoundFxService {
    /// Removes and returns every queued sound name in request order.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}

impl SoundFxService for QueuedSoundFxService {
    fn play(&self, name: &str) {
        self.queue.borrow_mut().push(name.to_string());
    }
}
