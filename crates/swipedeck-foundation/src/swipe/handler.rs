use super::{SwipeDirection, SwipeOutcome};

/// Receives swipe outcomes from a [`super::SwipeGestureController`].
///
/// Every method has an empty default so hosts implement only what they use.
/// Handlers are called from frame callbacks after the controller has returned
/// to idle, so they may start the next gesture or recycle the controller.
pub trait SwipeHandler {
    fn on_swipe_left(&self) {}

    fn on_swipe_right(&self) {}

    /// An upward commit.
    fn on_super_like(&self) {}

    /// The card settled back at its origin.
    fn on_swipe_reset(&self) {}

    /// Mid-gesture detail reveal toggled.
    fn on_reveal_detail(&self, revealed: bool) {
        let _ = revealed;
    }
}

/// Routes a resolved outcome to the matching handler method.
pub(crate) fn dispatch_outcome(handler: &dyn SwipeHandler, outcome: SwipeOutcome) {
    match outcome {
        SwipeOutcome::Commit(SwipeDirection::Left) => handler.on_swipe_left(),
        SwipeOutcome::Commit(SwipeDirection::Right) => handler.on_swipe_right(),
        SwipeOutcome::Commit(SwipeDirection::Up) => handler.on_super_like(),
        SwipeOutcome::Reset => handler.on_swipe_reset(),
    }
}

/// Handler that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSwipeHandler;

impl SwipeHandler for NoopSwipeHandler {}

type Callback = Box<dyn Fn()>;

/// Closure-backed [`SwipeHandler`].
///
/// ```ignore
/// let callbacks = SwipeCallbacks::new()
///     .on_swipe_left(|| log::info!("pass"))
///     .on_swipe_right(|| log::info!("like"));
/// ```
#[derive(Default)]
pub struct SwipeCallbacks {
    left: Option<Callback>,
    right: Option<Callback>,
    super_like: Option<Callback>,
    reset: Option<Callback>,
    reveal: Option<Box<dyn Fn(bool)>>,
}

impl SwipeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_left(mut self, callback: impl Fn() + 'static) -> Self {
        self.left = Some(Box::new(callback));
        self
    }

    pub fn on_swipe_right(mut self, callback: impl Fn() + 'static) -> Self {
        self.right = Some(Box::new(callback));
        self
    }

    pub fn on_super_like(mut self, callback: impl Fn() + 'static) -> Self {
        self.super_like = Some(Box::new(callback));
        self
    }

    pub fn on_swipe_reset(mut self, callback: impl Fn() + 'static) -> Self {
        self.reset = Some(Box::new(callback));
        self
    }

    pub fn on_reveal_detail(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.reveal = Some(Box::new(callback));
        self
    }
}

impl SwipeHandler for SwipeCallbacks {
    fn on_swipe_left(&self) {
        if let Some(callback) = &self.left {
            callback();
        }
    }

    fn on_swipe_right(&self) {
        if let Some(callback) = &self.right {
            callback();
        }
    }

    fn on_super_like(&self) {
        if let Some(callback) = &self.super_like {
            callback();
        }
    }

    fn on_swipe_reset(&self) {
        if let Some(callback) = &self.reset {
            callback();
        }
    }

    fn on_reveal_detail(&self, revealed: bool) {
        if let Some(callback) = &self.reveal {
            callback(revealed);
        }
    }
}

impl std::fmt::Debug for SwipeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeCallbacks")
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .field("super_like", &self.super_like.is_some())
            .field("reset", &self.reset.is_some())
            .field("reveal", &self.reveal.is_some())
            .finish()
    }
}
