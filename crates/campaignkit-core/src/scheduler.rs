//! Frame scheduling for per-frame animation callbacks.
//!
//! A [`FrameScheduler`] runs a callback once, before the next paint, and hands
//! back a [`FrameHandle`] that can cancel it. Browsers, native event loops and
//! the deterministic [`FrameLoop`] used by tests and the CLI all fit behind it.

/// Handle to a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

impl FrameHandle {
    /// Create a new frame handle.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Callback run on the next frame with the frame timestamp in milliseconds.
///
/// The scheduler is passed back in so the callback can request a follow-up
/// frame.
pub type FrameCallback = Box<dyn FnOnce(f64, &mut dyn FrameScheduler)>;

/// Something that can run a callback before the next paint.
pub trait FrameScheduler {
    /// Register `callback` for the next frame.
    fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending request. Returns `false` if it already ran or was
    /// never registered.
    fn cancel_frame(&mut self, handle: FrameHandle) -> bool;
}

/// Deterministic frame loop driven by an external clock.
///
/// Each call to [`run_frame`](Self::run_frame) fires the callbacks that were
/// pending when the frame began; requests made during the frame wait for the
/// next one.
#[derive(Default)]
pub struct FrameLoop {
    pending: Vec<(FrameHandle, FrameCallback)>,
    next_id: u64,
    frames_run: u64,
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("pending", &self.pending.len())
            .field("next_id", &self.next_id)
            .field("frames_run", &self.frames_run)
            .finish()
    }
}

impl FrameLoop {
    /// Create an empty frame loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether any callback is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Total frames run so far.
    #[must_use]
    pub const fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Run one frame at `now_ms`. Returns the number of callbacks fired.
    pub fn run_frame(&mut self, now_ms: f64) -> usize {
        let due = std::mem::take(&mut self.pending);
        let fired = due.len();
        for (_, callback) in due {
            callback(now_ms, self);
        }
        self.frames_run += 1;
        fired
    }

    /// Run frames every `frame_ms` starting at `start_ms` until nothing is
    /// pending or `max_frames` have run. Returns the timestamp of the last
    /// frame run.
    pub fn run_until_idle(&mut self, start_ms: f64, frame_ms: f64, max_frames: usize) -> f64 {
        let mut now = start_ms;
        let mut ran = 0;
        while self.has_pending() && ran < max_frames {
            self.run_frame(now);
            ran += 1;
            if self.has_pending() {
                now += frame_ms;
            }
        }
        now
    }
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending.push((handle, callback));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        self.pending.len() != before
    }
}
