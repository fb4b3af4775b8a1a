//! Scripts a short browsing session over a deck of profiles and logs what the
//! deck decides. Run with `RUST_LOG=debug` to see the controller's own logs.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use swipedeck_core::{MonotonicClock, Offset, Runtime, RuntimeScheduler};
use swipedeck_foundation::{
    PointerEvent, SwipeCallbacks, SwipeConfig, SwipeDeck, SwipeDirection,
};

#[derive(Debug)]
struct Profile {
    name: &'static str,
    age: u8,
}

impl Profile {
    const fn new(name: &'static str, age: u8) -> Self {
        Self { name, age }
    }
}

/// Records redraw requests the way a window's `request_redraw` would.
#[derive(Default)]
struct RedrawFlag(AtomicBool);

impl RuntimeScheduler for RedrawFlag {
    fn schedule_frame(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Stand-in for a platform event loop: real time, 60 Hz frames.
struct EventLoop {
    runtime: Runtime,
    redraw: Arc<RedrawFlag>,
    clock: MonotonicClock,
}

impl EventLoop {
    fn new() -> Self {
        let redraw = Arc::new(RedrawFlag::default());
        Self {
            runtime: Runtime::new(redraw.clone()),
            redraw,
            clock: MonotonicClock::new(),
        }
    }

    /// Renders frames while anything asks for one.
    fn run_until_idle(&self) -> usize {
        let mut frames = 0;
        while self.redraw.0.swap(false, Ordering::AcqRel) || self.runtime.has_frame_callbacks() {
            std::thread::sleep(Duration::from_millis(16));
            self.runtime
                .drain_frame_callbacks(self.clock.frame_time_nanos());
            frames += 1;
        }
        frames
    }

    fn event(&self, build: impl FnOnce(i64) -> PointerEvent) -> PointerEvent {
        build(self.clock.uptime_millis())
    }
}

/// Pointer down, a few moves spaced `step_ms` apart, pointer up.
fn gesture(
    event_loop: &EventLoop,
    deck: &mut SwipeDeck<Profile>,
    from: Offset,
    delta: Offset,
    step_ms: u64,
) {
    deck.pointer_event(&event_loop.event(|t| PointerEvent::down(1, from.x, from.y, t)));
    for step in 1..=6 {
        std::thread::sleep(Duration::from_millis(step_ms));
        let at = from + delta * (step as f32 / 6.0);
        deck.pointer_event(&event_loop.event(|t| PointerEvent::moved(1, at.x, at.y, t)));
    }
    let to = from + delta;
    deck.pointer_event(&event_loop.event(|t| PointerEvent::up(1, to.x, to.y, t)));
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let event_loop = EventLoop::new();
    let config = SwipeConfig::discover(360.0, 640.0);
    config.validate()?;

    let listener = SwipeCallbacks::new()
        .on_swipe_left(|| log::info!("pass"))
        .on_swipe_right(|| log::info!("like"))
        .on_super_like(|| log::info!("super like"))
        .on_swipe_reset(|| log::info!("card returned"))
        .on_reveal_detail(|revealed| log::info!("detail sheet revealed: {revealed}"));

    let mut deck = SwipeDeck::new(
        event_loop.runtime.handle(),
        config,
        vec![
            Profile::new("Ada", 36),
            Profile::new("Grace", 41),
            Profile::new("Linus", 28),
        ],
    )
    .with_listener(Rc::new(listener));
    deck.controller().set_on_position_changed(|position| {
        log::trace!(
            "card at ({:.1}, {:.1}) tilted {:.1} deg",
            position.x(),
            position.y(),
            position.rotation_degrees
        )
    });

    let centre = Offset::new(180.0, 320.0);

    log::info!("top card: {:?}", deck.active());
    gesture(&event_loop, &mut deck, centre, Offset::new(60.0, 0.0), 40);
    log::info!("short drag settled in {} frames", event_loop.run_until_idle());

    gesture(&event_loop, &mut deck, centre, Offset::new(160.0, 10.0), 16);
    log::info!("drag settled in {} frames", event_loop.run_until_idle());

    gesture(&event_loop, &mut deck, centre, Offset::new(-50.0, 0.0), 4);
    log::info!("fling settled in {} frames", event_loop.run_until_idle());

    let undone = deck.rewind()?;
    log::info!("rewound card {} ({:?})", undone.index, undone.direction);

    deck.swipe(SwipeDirection::Up)?;
    event_loop.run_until_idle();

    deck.push_cards([Profile::new("Barbara", 52), Profile::new("Ken", 47)]);
    for profile in deck.visible(3).iter().copied() {
        log::info!("next up: {} ({})", profile.name, profile.age);
    }
    log::info!(
        "stack scales: {:.2} {:.2} {:.2}",
        SwipeDeck::<Profile>::behind_card_scale(0),
        SwipeDeck::<Profile>::behind_card_scale(1),
        SwipeDeck::<Profile>::behind_card_scale(2)
    );

    while !deck.is_empty() {
        deck.swipe(SwipeDirection::Left)?;
        event_loop.run_until_idle();
    }
    if let Err(err) = deck.swipe(SwipeDirection::Right) {
        log::info!("{err}");
    }

    for decision in deck.take_decisions() {
        let name = deck.card(decision.index).map_or("?", |profile| profile.name);
        log::info!("decision: {name} -> {:?}", decision.direction);
    }
    Ok(())
}
