use crate::{
    config::TransportOpts,
    foundation::{
        core::FrameIndex,
        error::{TimingError, TimingResult},
    },
    playback::scheduler::{CallbackId, FrameScheduler, ManualScheduler},
};

/// Transport state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Not advancing.
    Stopped,
    /// Advancing one frame per scheduler tick.
    Playing,
}

impl PlaybackState {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
        }
    }

    /// Whether the transport is advancing.
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Change notification delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportEvent {
    /// The current frame changed.
    FrameChanged(FrameIndex),
    /// Playback started or stopped.
    StateChanged(PlaybackState),
}

/// Returned by [`Transport::subscribe`]; pass to [`Transport::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one accepted scheduler callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInfo {
    /// Frame after the tick.
    pub frame: FrameIndex,
    /// Time since the previous tick; `None` on the first tick after `play()`.
    pub delta_ms: Option<f64>,
    /// Whether the frame moved.
    pub advanced: bool,
}

type Listener = Box<dyn FnMut(&TransportEvent)>;

/// Single source of truth for the current frame.
///
/// Views subscribe instead of polling. While playing, exactly one scheduler callback
/// is outstanding; pausing, resetting or dropping the transport cancels it.
pub struct Transport<S: FrameScheduler> {
    scheduler: S,
    opts: TransportOpts,
    frame: FrameIndex,
    state: PlaybackState,
    pending: Option<CallbackId>,
    last_timestamp_ms: Option<f64>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: FrameScheduler> Transport<S> {
    /// Stopped transport at frame 0.
    pub fn new(scheduler: S, opts: TransportOpts) -> Self {
        Self {
            scheduler,
            opts,
            frame: FrameIndex::ZERO,
            state: PlaybackState::Stopped,
            pending: None,
            last_timestamp_ms: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current frame.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Last playable frame.
    pub fn duration(&self) -> FrameIndex {
        self.opts.duration
    }

    /// Outstanding scheduler callback, if any.
    pub fn pending_callback(&self) -> Option<CallbackId> {
        self.pending
    }

    /// The owned scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the owned scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Register a listener for frame and state changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&TransportEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: TransportEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    fn set_frame(&mut self, frame: FrameIndex) {
        if frame != self.frame {
            self.frame = frame;
            self.emit(TransportEvent::FrameChanged(frame));
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if state != self.state {
            tracing::debug!(
                from = self.state.name(),
                to = state.name(),
                frame = self.frame.0,
                "transport"
            );
            self.state = state;
            self.emit(TransportEvent::StateChanged(state));
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Frame after `frame` under the wrap policy; `None` when playback must stop.
    fn successor(&self, frame: FrameIndex) -> Option<FrameIndex> {
        if frame < self.opts.duration {
            Some(FrameIndex(frame.0 + 1))
        } else if self.opts.wrap {
            Some(FrameIndex::ZERO)
        } else {
            None
        }
    }

    /// Start playing. No-op while already playing.
    pub fn play(&mut self) {
        if self.state.is_playing() {
            return;
        }
        self.last_timestamp_ms = None;
        self.pending = Some(self.scheduler.request());
        self.set_state(PlaybackState::Playing);
    }

    /// Stop playing, keeping the current frame.
    pub fn pause(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.cancel_pending();
        self.set_state(PlaybackState::Stopped);
    }

    /// Flip between playing and stopped.
    pub fn toggle(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop and rewind to frame 0.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.set_state(PlaybackState::Stopped);
        self.set_frame(FrameIndex::ZERO);
    }

    /// Jump to `frame`, clamped to `[0, duration]`. Does not change the state.
    pub fn seek(&mut self, frame: FrameIndex) {
        self.set_frame(frame.clamp_to(self.opts.duration));
    }

    /// Jump to `frame`, rejecting frames past the duration instead of clamping.
    pub fn try_seek(&mut self, frame: FrameIndex) -> TimingResult<()> {
        if frame > self.opts.duration {
            return Err(TimingError::transport(format!(
                "frame {frame} is past the last frame {}",
                self.opts.duration
            )));
        }
        self.set_frame(frame);
        Ok(())
    }

    /// Move one frame forward, wrapping (or holding when wrap is off).
    pub fn step_forward(&mut self) {
        let next = self.successor(self.frame).unwrap_or(self.opts.duration);
        self.set_frame(next);
    }

    /// Move one frame back, stopping at 0.
    pub fn step_backward(&mut self) {
        self.set_frame(FrameIndex(self.frame.0.saturating_sub(1)));
    }

    /// Change the duration, pulling the current frame back into range.
    pub fn set_duration(&mut self, duration: FrameIndex) {
        self.opts.duration = duration;
        if self.frame > duration {
            self.set_frame(duration);
        }
    }

    /// Deliver a scheduler callback.
    ///
    /// Callbacks other than the outstanding one are stale and ignored. The first tick
    /// after `play()` only records its timestamp; later ticks advance one frame and
    /// report the delta from the previous tick's timestamp.
    pub fn on_frame(&mut self, id: CallbackId, timestamp_ms: f64) -> Option<TickInfo> {
        if self.pending != Some(id) {
            tracing::debug!(id = id.0, "ignoring stale frame callback");
            return None;
        }
        self.pending = None;
        if !self.state.is_playing() {
            return None;
        }

        let delta_ms = self.last_timestamp_ms.map(|prev| timestamp_ms - prev);
        self.last_timestamp_ms = Some(timestamp_ms);

        let advanced = match delta_ms {
            None => false,
            Some(_) => match self.successor(self.frame) {
                Some(next) => {
                    let moved = next != self.frame;
                    self.set_frame(next);
                    moved
                }
                None => {
                    self.set_state(PlaybackState::Stopped);
                    false
                }
            },
        };

        if self.state.is_playing() {
            self.pending = Some(self.scheduler.request());
        }
        Some(TickInfo {
            frame: self.frame,
            delta_ms,
            advanced,
        })
    }
}

impl Transport<ManualScheduler> {
    /// Transport over a fresh [`ManualScheduler`].
    pub fn manual(opts: TransportOpts) -> Self {
        Self::new(ManualScheduler::new(), opts)
    }

    /// Advance the manual clock by `dt_ms` and deliver the due callback, if any.
    pub fn pump(&mut self, dt_ms: f64) -> Option<TickInfo> {
        let (id, ts) = self.scheduler.advance(dt_ms)?;
        self.on_frame(id, ts)
    }
}

impl<S: FrameScheduler> Drop for Transport<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl<S: FrameScheduler> std::fmt::Debug for Transport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("frame", &self.frame)
            .field("state", &self.state)
            .field("opts", &self.opts)
            .field("pending", &self.pending)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/transport.rs"]
mod tests;
