use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callback_receives_frame_time() {
    let runtime = Runtime::headless();
    let seen = Rc::new(Cell::new(None));
    let registration = {
        let seen = Rc::clone(&seen);
        runtime
            .frame_clock()
            .with_frame_nanos(move |time| seen.set(Some(time)))
    };
    assert!(registration.is_active());
    assert!(runtime.needs_frame());

    runtime.drain_frame_callbacks(42);

    assert_eq!(seen.get(), Some(42));
    assert!(!runtime.needs_frame());
    drop(registration);
}

#[test]
fn with_frame_millis_converts_nanos() {
    let runtime = Runtime::headless();
    let seen = Rc::new(Cell::new(0));
    let _registration = {
        let seen = Rc::clone(&seen);
        runtime
            .frame_clock()
            .with_frame_millis(move |millis| seen.set(millis))
    };

    runtime.drain_frame_callbacks(250_000_000);

    assert_eq!(seen.get(), 250);
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::headless();
    let fired = Rc::new(Cell::new(false));
    let registration = {
        let fired = Rc::clone(&fired);
        runtime.frame_clock().with_frame_nanos(move |_| fired.set(true))
    };

    drop(registration);
    assert!(!runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(FRAME_INTERVAL_NANOS);

    assert!(!fired.get());
}

#[test]
fn explicit_cancel_removes_only_that_callback() {
    let runtime = Runtime::headless();
    let order = Rc::new(RefCell::new(Vec::new()));
    let first = {
        let order = Rc::clone(&order);
        runtime
            .frame_clock()
            .with_frame_nanos(move |_| order.borrow_mut().push("first"))
    };
    let _second = {
        let order = Rc::clone(&order);
        runtime
            .frame_clock()
            .with_frame_nanos(move |_| order.borrow_mut().push("second"))
    };

    first.cancel();
    runtime.drain_frame_callbacks(FRAME_INTERVAL_NANOS);

    assert_eq!(order.borrow().as_slice(), &["second"]);
}

#[test]
fn callbacks_registered_while_draining_run_next_frame() {
    let runtime = Runtime::headless();
    let handle = runtime.handle();
    let times = Rc::new(RefCell::new(Vec::new()));
    {
        let times = Rc::clone(&times);
        let handle = handle.clone();
        handle.clone().register_frame_callback(move |time| {
            times.borrow_mut().push(time);
            let times = Rc::clone(&times);
            handle.register_frame_callback(move |time| times.borrow_mut().push(time));
        });
    }

    runtime.drain_frame_callbacks(10);
    assert_eq!(times.borrow().as_slice(), &[10]);
    assert!(runtime.has_frame_callbacks());

    runtime.drain_frame_callbacks(20);
    assert_eq!(times.borrow().as_slice(), &[10, 20]);
}

#[test]
fn scheduler_is_asked_for_a_frame_on_registration() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());

    let _registration = runtime.frame_clock().with_frame_nanos(|_| {});

    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 1);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::headless();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    handle.drain_frame_callbacks(0);
    assert!(!handle.needs_frame());
}

#[test]
fn offset_arithmetic() {
    let a = Offset::new(3.0, 4.0);
    let b = Offset::new(1.0, -1.0);
    assert_eq!(a + b, Offset::new(4.0, 3.0));
    assert_eq!(a - b, Offset::new(2.0, 5.0));
    assert_eq!(a * 2.0, Offset::new(6.0, 8.0));
    assert_eq!(-a, Offset::new(-3.0, -4.0));
    assert_eq!(a.distance(), 5.0);
    assert!(!Offset::new(f32::NAN, 0.0).is_finite());
}

#[test]
fn monotonic_clock_does_not_go_backwards() {
    let clock = MonotonicClock::new();
    let first = clock.frame_time_nanos();
    let second = clock.frame_time_nanos();
    assert!(second >= first);
    assert!(clock.uptime_millis() >= 0);
}
