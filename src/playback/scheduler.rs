/// Handle for one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub u64);

/// The host's "call me on the next frame" facility.
///
/// A browser would back this with `requestAnimationFrame`; a native host with its
/// event loop. The host later reports the callback with
/// [`Transport::on_frame`](crate::Transport::on_frame).
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request(&mut self) -> CallbackId;
    /// Cancel a previously requested callback. Unknown ids are ignored.
    fn cancel(&mut self, id: CallbackId);
}

/// Deterministic scheduler driven by explicit clock advances.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<CallbackId>,
    now_ms: f64,
}

impl ManualScheduler {
    /// Scheduler with its clock at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback waiting to fire, if any.
    pub fn pending(&self) -> Option<CallbackId> {
        self.pending
    }

    /// Current clock reading.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward and hand out the due callback with its timestamp.
    pub fn advance(&mut self, dt_ms: f64) -> Option<(CallbackId, f64)> {
        self.now_ms += dt_ms.max(0.0);
        self.pending.take().map(|id| (id, self.now_ms))
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> CallbackId {
        self.next_id += 1;
        let id = CallbackId(self.next_id);
        self.pending = Some(id);
        id
    }

    fn cancel(&mut self, id: CallbackId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}
