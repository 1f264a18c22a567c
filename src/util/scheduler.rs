//! Timer capability used by flash dismissal and debounce.
//!
//! DESIGN
//! ======
//! Components never call `setTimeout` directly; they hold an
//! `Rc<dyn Scheduler>`. In the browser that is [`BrowserScheduler`]
//! (hydrate only); natively it is [`ManualScheduler`], a virtual clock that
//! tests advance explicitly. Everything runs on one thread, so callbacks
//! are plain `FnOnce` boxes without `Send` bounds.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

/// Opaque handle for a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

pub type TimerCallback = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancel a pending callback. Unknown or already fired handles are ignored.
    fn clear_timeout(&self, handle: TimerHandle);
}

// =============================================================================
// MANUAL CLOCK
// =============================================================================

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    /// Keyed by (due time, id) so equal deadlines fire in scheduling order.
    pending: BTreeMap<(Duration, u64), TimerCallback>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move the clock forward by `by`, firing every callback that comes due.
    ///
    /// Callbacks may schedule further timers; those fire too if they fall
    /// inside the window. Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut fired = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state.pending.first_key_value().map(|(&(due, _), _)| due);
                match due {
                    Some(due) if due <= target => {
                        state.now = due;
                        state.pending.pop_first().map(|(_, cb)| cb)
                    }
                    _ => None,
                }
            };
            let Some(callback) = next else { break };
            callback();
            fired += 1;
        }
        self.state.borrow_mut().now = target;
        fired
    }

    /// Convenience wrapper over [`ManualScheduler::advance`] in milliseconds.
    pub fn advance_ms(&self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.insert((due, id), callback);
        TimerHandle(id)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.state.borrow_mut().pending.retain(|&(_, id), _| id != handle.0);
    }
}

// =============================================================================
// BROWSER TIMERS
// =============================================================================

#[cfg(feature = "hydrate")]
pub use browser::BrowserScheduler;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::Duration;

    use gloo_timers::callback::Timeout;

    use super::{Scheduler, TimerCallback, TimerHandle};

    /// Scheduler backed by `setTimeout` via `gloo-timers`.
    ///
    /// Pending [`Timeout`]s live in a map keyed by handle; dropping one
    /// clears the browser timer, so cancellation leaves nothing behind.
    #[derive(Default)]
    pub struct BrowserScheduler {
        next_id: Cell<u64>,
        pending: Rc<RefCell<HashMap<u64, Timeout>>>,
    }

    impl BrowserScheduler {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Scheduler for BrowserScheduler {
        fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            let registry = Rc::clone(&self.pending);
            let timeout = Timeout::new(millis, move || {
                let fired = registry.borrow_mut().remove(&id);
                callback();
                // The closure being run belongs to `fired`; free it after this task.
                if let Some(fired) = fired {
                    wasm_bindgen_futures::spawn_local(async move { drop(fired) });
                }
            });
            self.pending.borrow_mut().insert(id, timeout);
            TimerHandle(id)
        }

        fn clear_timeout(&self, handle: TimerHandle) {
            // Dropping the `Timeout` clears it.
            self.pending.borrow_mut().remove(&handle.0);
        }
    }
}
