//! Trailing-edge debounce over an injected [`Scheduler`].
//!
//! Typical use is a search box: every keystroke calls [`Debounced::call`],
//! and the query only runs once typing pauses for `wait`.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::scheduler::{Scheduler, TimerHandle};

/// A rate-limited wrapper around a callback. See [`debounce`].
pub struct Debounced<A> {
    scheduler: Rc<dyn Scheduler>,
    wait: Duration,
    callback: Rc<dyn Fn(A)>,
    pending: Rc<Cell<Option<TimerHandle>>>,
}

// Manual impl: cloning shares the same pending timer and must not require `A: Clone`.
impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            scheduler: Rc::clone(&self.scheduler),
            wait: self.wait,
            callback: Rc::clone(&self.callback),
            pending: Rc::clone(&self.pending),
        }
    }
}

/// Wrap `callback` so that bursts of calls collapse into one.
///
/// Each call cancels the previously scheduled invocation and schedules a new
/// one `wait` later with the latest arguments.
pub fn debounce<A, F>(scheduler: Rc<dyn Scheduler>, wait: Duration, callback: F) -> Debounced<A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced { scheduler, wait, callback: Rc::new(callback), pending: Rc::new(Cell::new(None)) }
}

impl<A: 'static> Debounced<A> {
    pub fn call(&self, args: A) {
        self.cancel();
        let callback = Rc::clone(&self.callback);
        let pending = Rc::clone(&self.pending);
        let handle = self.scheduler.set_timeout(
            self.wait,
            Box::new(move || {
                pending.set(None);
                callback(args);
            }),
        );
        self.pending.set(Some(handle));
    }

    /// Drop the scheduled invocation, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.clear_timeout(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}
