use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::util::scheduler::ManualScheduler;

fn setup(wait_ms: u64) -> (Rc<ManualScheduler>, Rc<RefCell<Vec<u32>>>, Debounced<u32>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let debounced = debounce(
        scheduler.clone() as Rc<dyn Scheduler>,
        Duration::from_millis(wait_ms),
        move |n: u32| sink.borrow_mut().push(n),
    );
    (scheduler, calls, debounced)
}

#[test]
fn burst_collapses_to_last_arguments() {
    let (scheduler, calls, debounced) = setup(100);
    for n in 1..=5 {
        debounced.call(n);
    }
    scheduler.advance_ms(150);
    assert_eq!(*calls.borrow(), vec![5]);
}

#[test]
fn fires_wait_after_last_call() {
    let (scheduler, calls, debounced) = setup(100);
    debounced.call(1);
    scheduler.advance_ms(60);
    debounced.call(2);
    scheduler.advance_ms(60);
    assert!(calls.borrow().is_empty(), "window restarts on each call");
    scheduler.advance_ms(40);
    assert_eq!(*calls.borrow(), vec![2]);
}

#[test]
fn separated_calls_each_fire() {
    let (scheduler, calls, debounced) = setup(100);
    debounced.call(1);
    scheduler.advance_ms(100);
    debounced.call(2);
    scheduler.advance_ms(100);
    assert_eq!(*calls.borrow(), vec![1, 2]);
}

#[test]
fn only_one_timer_is_ever_pending() {
    let (scheduler, _calls, debounced) = setup(100);
    for n in 0..10 {
        debounced.call(n);
    }
    assert_eq!(scheduler.pending_count(), 1);
    assert!(debounced.is_pending());
    scheduler.advance_ms(100);
    assert!(!debounced.is_pending());
}

#[test]
fn cancel_drops_pending_call() {
    let (scheduler, calls, debounced) = setup(100);
    debounced.call(7);
    debounced.cancel();
    scheduler.advance_ms(500);
    assert!(calls.borrow().is_empty());
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn clones_share_the_window() {
    let (scheduler, calls, debounced) = setup(100);
    let other = debounced.clone();
    debounced.call(1);
    other.call(2);
    scheduler.advance_ms(100);
    assert_eq!(*calls.borrow(), vec![2]);
    assert_eq!(other.wait(), Duration::from_millis(100));
}
