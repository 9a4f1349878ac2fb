use crate::{
    animation::curve::sample_curve,
    edit::ops::Handle,
    foundation::core::{BezPath, FrameSpan, Point},
    scene::{
        model::{PropertyName, Scene},
        path::PropertyPath,
    },
};

/// Extra room above and below the curve's value range.
pub const VALUE_PADDING: f64 = 20.0;

const SAMPLE_COUNT: usize = 32;

/// Plot area in screen units, with margins around the chart.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Total width.
    pub width: f64,
    /// Total height.
    pub height: f64,
    /// Margins `[top, right, bottom, left]`.
    pub margin: [f64; 4],
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 320.0,
            margin: [20.0, 30.0, 30.0, 50.0],
        }
    }
}

impl Viewport {
    fn chart_size(&self) -> (f64, f64) {
        let [top, right, bottom, left] = self.margin;
        (
            (self.width - left - right).max(1.0),
            (self.height - top - bottom).max(1.0),
        )
    }
}

/// Graph editor contents for one selected property.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
    /// The plotted property.
    pub path: PropertyPath,
    /// Start and end keyframes as `(frame, value)`.
    pub anchors: [Point; 2],
    /// Control points `p1`, `p2`.
    pub handles: [Point; 2],
    /// Horizontal extent: the motion's frames.
    pub frame_domain: FrameSpan,
    /// Vertical extent: min/max of the four values, padded.
    pub value_domain: (f64, f64),
    /// SVG path data of the curve in `(frame, value)` space.
    pub curve_svg: String,
    /// Evaluated `(frame, value)` samples as playback sees them.
    pub samples: Vec<(f64, f64)>,
    /// Properties the motion defines, for the property picker.
    pub available: Vec<PropertyName>,
}

impl GraphView {
    /// Build the graph for `path`; `None` when it does not resolve.
    pub fn build(scene: &Scene, path: &PropertyPath) -> Option<Self> {
        let r = scene.resolve(path)?;
        let prop = r.property;
        let anchors = [prop.start().to_point(), prop.end().to_point()];
        let handles = [prop.curve.p1, prop.curve.p2];

        let ys = [anchors[0].y, handles[0].y, handles[1].y, anchors[1].y];
        let lo = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut bez = BezPath::new();
        bez.move_to(anchors[0]);
        bez.curve_to(handles[0], handles[1], anchors[1]);

        Some(Self {
            path: path.clone(),
            anchors,
            handles,
            frame_domain: r.motion.span(),
            value_domain: (lo - VALUE_PADDING, hi + VALUE_PADDING),
            curve_svg: bez.to_svg(),
            samples: sample_curve(r.motion, prop, SAMPLE_COUNT),
            available: r.motion.properties.iter().map(|(n, _)| n).collect(),
        })
    }

    /// Position of `handle`.
    pub fn handle(&self, handle: Handle) -> Point {
        match handle {
            Handle::P1 => self.handles[0],
            Handle::P2 => self.handles[1],
        }
    }

    /// `(frame, value)` to screen coordinates (y grows downward).
    pub fn project(&self, vp: &Viewport, p: Point) -> Point {
        let (w, h) = vp.chart_size();
        let [top, _, _, left] = vp.margin;
        let (f0, f1) = (self.frame_domain.start.as_f64(), self.frame_domain.end.as_f64());
        let (v0, v1) = self.value_domain;
        let fx = if f1 > f0 { (p.x - f0) / (f1 - f0) } else { 0.0 };
        let fy = (p.y - v0) / (v1 - v0);
        Point::new(left + fx * w, top + (1.0 - fy) * h)
    }

    /// Screen coordinates back to `(frame, value)`. Not clamped; edits clamp the frame.
    pub fn unproject(&self, vp: &Viewport, s: Point) -> Point {
        let (w, h) = vp.chart_size();
        let [top, _, _, left] = vp.margin;
        let (f0, f1) = (self.frame_domain.start.as_f64(), self.frame_domain.end.as_f64());
        let (v0, v1) = self.value_domain;
        let fx = (s.x - left) / w;
        let fy = 1.0 - (s.y - top) / h;
        Point::new(f0 + fx * (f1 - f0), v0 + fy * (v1 - v0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/graph.rs"]
mod tests;
