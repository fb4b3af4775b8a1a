use super::*;
use crate::{AnimationSpec, CubicBezier, Easing, SpringSpec};

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipedeck_core::{Offset, Runtime, FRAME_INTERVAL_NANOS};

fn pump(runtime: &Runtime, frames: usize, frame_time: &mut u64) {
    for _ in 0..frames {
        if !runtime.has_frame_callbacks() {
            break;
        }
        *frame_time += FRAME_INTERVAL_NANOS;
        runtime.drain_frame_callbacks(*frame_time);
    }
}

#[test]
fn tween_interpolates_over_time_and_fires_end_once() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let ends = Rc::new(Cell::new(0));
    let samples = Rc::new(RefCell::new(Vec::new()));
    {
        let samples = Rc::clone(&samples);
        animatable.set_on_update(move |value| samples.borrow_mut().push(*value));
    }
    {
        let ends = Rc::clone(&ends);
        animatable.animate_to(
            1.0,
            AnimationSpec::linear(200),
            move || ends.set(ends.get() + 1),
        );
    }
    assert!(animatable.is_running());
    assert_eq!(animatable.value(), 0.0);

    let mut frame_time = 0u64;
    pump(&runtime, 64, &mut frame_time);

    let samples = samples.borrow();
    assert!(
        samples.iter().any(|value| *value > 0.0 && *value < 1.0),
        "animation should report intermediate values"
    );
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*samples.last().expect("at least one frame"), 1.0);
    assert_eq!(ends.get(), 1);
    assert!(!animatable.is_running());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn tween_finishes_after_its_duration() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let finished_at = Rc::new(Cell::new(None));
    let frame_time = Rc::new(Cell::new(0u64));
    {
        let finished_at = Rc::clone(&finished_at);
        let frame_time = Rc::clone(&frame_time);
        animatable.animate_to(10.0, AnimationSpec::linear(250), move || {
            finished_at.set(Some(frame_time.get()))
        });
    }

    let first_frame = FRAME_INTERVAL_NANOS;
    let mut now = 0;
    for _ in 0..40 {
        now += FRAME_INTERVAL_NANOS;
        frame_time.set(now);
        runtime.drain_frame_callbacks(now);
    }

    let finished_at = finished_at.get().expect("tween completes");
    assert!(finished_at - first_frame >= 250_000_000);
    assert!(finished_at - first_frame < 250_000_000 + 2 * FRAME_INTERVAL_NANOS);
}

#[test]
fn zero_duration_tween_completes_on_first_frame() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(Offset::ZERO, runtime.handle());
    let done = Rc::new(Cell::new(false));
    {
        let done = Rc::clone(&done);
        animatable.animate_to(Offset::new(5.0, 5.0), AnimationSpec::linear(0), move || {
            done.set(true)
        });
    }

    runtime.drain_frame_callbacks(FRAME_INTERVAL_NANOS);

    assert!(done.get());
    assert_eq!(animatable.value(), Offset::new(5.0, 5.0));
}

#[test]
fn delay_holds_the_start_value() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    animatable.animate_to(1.0, AnimationSpec::linear(100).with_delay(100), || {});

    let mut frame_time = 0u64;
    pump(&runtime, 5, &mut frame_time);
    assert_eq!(animatable.value(), 0.0);

    pump(&runtime, 30, &mut frame_time);
    assert_eq!(animatable.value(), 1.0);
}

#[test]
fn superseded_animation_drops_its_end_callback() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    {
        let first = Rc::clone(&first);
        animatable.animate_to(100.0, AnimationSpec::linear(200), move || {
            first.set(first.get() + 1)
        });
    }
    let mut frame_time = 0u64;
    pump(&runtime, 4, &mut frame_time);
    let midway = animatable.value();
    assert!(midway > 0.0 && midway < 100.0);

    {
        let second = Rc::clone(&second);
        animatable.animate_to(0.0, AnimationSpec::linear(200), move || {
            second.set(second.get() + 1)
        });
    }
    pump(&runtime, 64, &mut frame_time);

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
    assert_eq!(animatable.value(), 0.0);
}

#[test]
fn stop_cancels_without_invoking_end() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let ended = Rc::new(Cell::new(false));
    {
        let ended = Rc::clone(&ended);
        animatable.animate_to(1.0, AnimationSpec::linear(200), move || ended.set(true));
    }
    let mut frame_time = 0u64;
    pump(&runtime, 3, &mut frame_time);

    animatable.stop();
    let stopped_at = animatable.value();
    assert!(!animatable.is_running());
    assert!(!runtime.has_frame_callbacks());

    pump(&runtime, 64, &mut frame_time);
    assert!(!ended.get());
    assert_eq!(animatable.value(), stopped_at);
}

#[test]
fn dropping_the_animatable_cancels_the_frame_loop() {
    let runtime = Runtime::headless();
    let ended = Rc::new(Cell::new(false));
    {
        let animatable = Animatable::new(0.0f32, runtime.handle());
        let ended = Rc::clone(&ended);
        animatable.animate_to(1.0, AnimationSpec::linear(200), move || ended.set(true));
    }

    assert!(!runtime.has_frame_callbacks());
    let mut frame_time = 0u64;
    pump(&runtime, 64, &mut frame_time);
    assert!(!ended.get());
}

#[test]
fn snap_to_notifies_observer_and_stops() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(Offset::ZERO, runtime.handle());
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        animatable.set_on_update(move |value| seen.borrow_mut().push(*value));
    }
    animatable.animate_to(Offset::new(100.0, 0.0), AnimationSpec::linear(200), || {});

    animatable.snap_to(Offset::new(-3.0, 4.0));

    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), Offset::new(-3.0, 4.0));
    assert_eq!(animatable.target(), Offset::new(-3.0, 4.0));
    assert_eq!(seen.borrow().as_slice(), &[Offset::new(-3.0, 4.0)]);
}

#[test]
fn end_callback_may_restart_the_same_animatable() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let second_done = Rc::new(Cell::new(false));
    {
        let again = animatable.clone();
        let second_done = Rc::clone(&second_done);
        animatable.animate_to(1.0, AnimationSpec::linear(50), move || {
            again.animate_to(0.0, AnimationSpec::linear(50), move || second_done.set(true));
        });
    }

    let mut frame_time = 0u64;
    pump(&runtime, 64, &mut frame_time);

    assert!(second_done.get());
    assert_eq!(animatable.value(), 0.0);
}

#[test]
fn spring_settles_on_target() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(Offset::new(120.0, 40.0), runtime.handle());
    let ended = Rc::new(Cell::new(false));
    {
        let ended = Rc::clone(&ended);
        animatable.animate_to(Offset::ZERO, SpringSpec::default(), move || ended.set(true));
    }

    let mut frame_time = 0u64;
    pump(&runtime, 600, &mut frame_time);

    assert!(ended.get(), "spring should settle");
    assert_eq!(animatable.value(), Offset::ZERO);
}

#[test]
fn bouncy_spring_overshoots() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let max_seen = Rc::new(Cell::new(0.0f32));
    {
        let max_seen = Rc::clone(&max_seen);
        animatable.set_on_update(move |value| max_seen.set(max_seen.get().max(*value)));
    }
    animatable.animate_to(100.0, SpringSpec::bouncy(), || {});

    let mut frame_time = 0u64;
    pump(&runtime, 600, &mut frame_time);

    assert!(max_seen.get() > 100.0, "under-damped spring should overshoot");
    assert_eq!(animatable.value(), 100.0);
}

#[test]
fn spring_that_cannot_settle_still_lands_on_target() {
    let runtime = Runtime::headless();
    let springs = [
        SpringSpec::new(1.0, 0.0),
        SpringSpec::new(0.0, 1500.0),
        SpringSpec::new(f32::NAN, 1500.0),
    ];
    for spring in springs {
        let animatable = Animatable::new(0.0f32, runtime.handle());
        let ends = Rc::new(Cell::new(0));
        {
            let ends = Rc::clone(&ends);
            animatable.animate_to(60.0, spring, move || ends.set(ends.get() + 1));
        }

        let mut frame_time = 0u64;
        pump(&runtime, 400, &mut frame_time);

        assert_eq!(ends.get(), 1, "{spring:?} never finished");
        assert_eq!(animatable.value(), 60.0);
        assert!(!animatable.is_running());
        assert!(!runtime.has_frame_callbacks());
    }
}

#[test]
fn spring_settling_requires_positive_finite_parameters() {
    assert!(SpringSpec::default().is_settling());
    assert!(SpringSpec::bouncy().is_settling());
    assert!(!SpringSpec::new(1.0, 0.0).is_settling());
    assert!(!SpringSpec::new(0.0, 1500.0).is_settling());
    assert!(!SpringSpec::new(1.0, f32::INFINITY).is_settling());
    assert!(!SpringSpec {
        position_threshold: f32::NAN,
        ..SpringSpec::default()
    }
    .is_settling());
    assert!(!SpringSpec {
        velocity_threshold: 0.0,
        ..SpringSpec::default()
    }
    .is_settling());
}

#[test]
fn offset_lerp_interpolates_both_axes() {
    let start = Offset::new(0.0, 10.0);
    let end = Offset::new(100.0, -10.0);
    assert_eq!(start.lerp(&end, 0.5), Offset::new(50.0, 0.0));
    assert_eq!(start.lerp(&end, 1.0), end);
}

#[test]
fn linear_easing_is_identity_and_clamped() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
    assert_eq!(Easing::Linear.transform(1.5), 1.0);
}

#[test]
fn every_easing_starts_at_zero_and_ends_at_one() {
    let easings = [
        Easing::Linear,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinear,
        Easing::Cubic(CubicBezier::new(0.42, 0.0, 0.58, 1.0)),
    ];

    for easing in easings {
        assert_eq!(easing.transform(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "{easing:?}");
        let mut previous = 0.0;
        for step in 1..=20 {
            let eased = easing.transform(step as f32 / 20.0);
            assert!(eased >= previous - 1e-4, "{easing:?} dips at step {step}");
            previous = eased;
        }
    }
}

#[test]
fn outgoing_curve_starts_slow_and_incoming_curve_starts_fast() {
    assert!(Easing::FastOutLinear.transform(0.25) < 0.25);
    assert!(Easing::LinearOutSlowIn.transform(0.25) > 0.25);
}

#[test]
fn symmetric_bezier_passes_through_the_midpoint() {
    let ease_in_out = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    assert!((ease_in_out.transform(0.5) - 0.5).abs() < 1e-3);
    assert_eq!(Easing::from(ease_in_out), Easing::Cubic(ease_in_out));
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowIn);
    assert_eq!(Easing::default(), Easing::FastOutSlowIn);
    assert_eq!(spec.delay_millis, 0);
    assert_eq!(spec.with_delay(20).total_millis(), 320);
}

#[test]
fn spring_presets() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
    assert_eq!(
        AnimationType::from(SpringSpec::bouncy()),
        AnimationType::Spring(SpringSpec::new(0.5, 1500.0))
    );
}

#[test]
fn spring_anchors_on_its_first_frame() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    animatable.animate_to(50.0, SpringSpec::stiff(), || {});

    runtime.drain_frame_callbacks(FRAME_INTERVAL_NANOS);
    assert_eq!(animatable.value(), 0.0);
    assert!(animatable.is_running());
    assert_eq!(animatable.target(), 50.0);
    assert_eq!(
        animatable.animation_type(),
        AnimationType::Spring(SpringSpec::stiff())
    );

    runtime.drain_frame_callbacks(2 * FRAME_INTERVAL_NANOS);
    assert!(animatable.value() > 0.0);
}
