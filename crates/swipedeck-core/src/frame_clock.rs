use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Hands out one-shot frame callbacks tied to a runtime.
#[derive(Clone, Debug)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `callback` with the next frame's timestamp in nanoseconds.
    ///
    /// Dropping the returned registration cancels the callback, so keep it
    /// for as long as the frame is wanted.
    #[must_use = "dropping the registration cancels the callback"]
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        FrameCallbackRegistration {
            id: self.runtime.register_frame_callback(callback),
            runtime: self.runtime.clone(),
        }
    }

    #[must_use = "dropping the registration cancels the callback"]
    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| callback(nanos / 1_000_000))
    }
}

/// Keeps a frame callback queued. Cancels it on drop.
#[derive(Debug)]
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    /// False when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}
