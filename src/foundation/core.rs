pub use kurbo::{BezPath, Point};

/// Absolute frame on the scene timeline.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame zero.
    pub const ZERO: Self = Self(0);

    /// Frame as a float, for curve parameters and handle coordinates.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Clamp into the inclusive range `[0, duration]`.
    pub fn clamp_to(self, duration: FrameIndex) -> Self {
        Self(self.0.min(duration.0))
    }

    /// Position of this frame as a fraction of `duration` (0 when the timeline is empty).
    pub fn fraction_of(self, duration: FrameIndex) -> f64 {
        if duration.0 == 0 {
            return 0.0;
        }
        self.as_f64() / duration.as_f64()
    }
}

impl From<u64> for FrameIndex {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive frame span `[start, end]` as used by motions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSpan {
    /// First frame of the span.
    pub start: FrameIndex,
    /// Last frame of the span (inclusive).
    pub end: FrameIndex,
}

impl FrameSpan {
    /// Build a span, ordering the bounds if they are given reversed.
    pub fn new(a: FrameIndex, b: FrameIndex) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A span covering exactly one frame.
    pub fn single(f: FrameIndex) -> Self {
        Self { start: f, end: f }
    }

    /// Number of frame steps between the bounds (`end - start`).
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Whether `f` lies within the inclusive bounds.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start <= f && f <= self.end
    }

    /// Grow the span so it covers `f`.
    pub fn include(self, f: FrameIndex) -> Self {
        Self {
            start: self.start.min(f),
            end: self.end.max(f),
        }
    }

    /// Clamp a continuous frame coordinate into the span.
    pub fn clamp_f64(self, x: f64) -> f64 {
        x.clamp(self.start.as_f64(), self.end.as_f64())
    }
}

/// One tracked 2D point as delivered by the tracker: `[x, y]`.
pub type LinePoint = [f64; 2];

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
