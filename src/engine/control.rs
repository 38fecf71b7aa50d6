//! Cooperative pause and kill flags shared with the auto-run loop
//!
//! The inter-step delay is the only place the engine blocks. It waits on a
//! condition variable, so a pause or kill from another thread wakes it
//! immediately instead of after the full delay.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct RunState {
    paused: bool,
    kill_requested: bool,
}

#[derive(Debug, Default)]
struct RunControl {
    state: Mutex<RunState>,
    wake: Condvar,
}

/// Shared handle to the run flags. Cheap to clone and usable from any thread.
#[derive(Debug, Clone, Default)]
pub struct RunHandle {
    inner: Arc<RunControl>,
}

impl RunHandle {
    pub fn new(paused: bool) -> Self {
        let handle = RunHandle::default();
        handle.lock().paused = paused;
        handle
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        // The flags are plain booleans; a panic elsewhere cannot leave them torn.
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    pub fn pause(&self) {
        self.lock().paused = true;
        self.inner.wake.notify_all();
    }

    pub fn resume(&self) {
        self.lock().paused = false;
        self.inner.wake.notify_all();
    }

    /// Flip the pause flag, returning whether it is now paused
    pub fn toggle(&self) -> bool {
        let paused = {
            let mut state = self.lock();
            state.paused = !state.paused;
            state.paused
        };
        self.inner.wake.notify_all();
        paused
    }

    /// Ask the loop to discard the active sort before its next step
    pub fn request_kill(&self) {
        {
            let mut state = self.lock();
            state.kill_requested = true;
            state.paused = true;
        }
        self.inner.wake.notify_all();
    }

    /// Consume a pending kill request
    pub(crate) fn take_kill_request(&self) -> bool {
        std::mem::take(&mut self.lock().kill_requested)
    }

    /// Wait up to `delay`, returning early if paused or killed.
    ///
    /// Returns `true` when the full delay elapsed and the loop may step.
    pub fn wait(&self, delay: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .inner
            .wake
            .wait_timeout_while(guard, delay, |s| !s.paused && !s.kill_requested)
            .unwrap_or_else(|e| e.into_inner());
        !guard.paused && !guard.kill_requested
    }
}
