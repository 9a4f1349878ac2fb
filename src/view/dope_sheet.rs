use crate::{
    foundation::core::FrameIndex,
    scene::{model::Scene, path::PropertyPath},
};

/// One motion bar, positioned as fractions of the scene duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DopeBar {
    /// Motion name.
    pub motion_name: String,
    /// First frame.
    pub start_frame: FrameIndex,
    /// Last frame.
    pub end_frame: FrameIndex,
    /// Left edge in `[0, 1]`.
    pub left: f64,
    /// Width in `[0, 1]`.
    pub width: f64,
    /// Whether this motion holds the selection.
    pub selected: bool,
}

/// One object row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DopeRow {
    /// Object id.
    pub object_id: String,
    /// Bar colour.
    pub color: String,
    /// One bar per motion, authored order.
    pub bars: Vec<DopeBar>,
}

/// Timeline listing of every object and motion.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DopeSheet {
    /// Scene duration the fractions are relative to.
    pub duration: FrameIndex,
    /// Playhead position in `[0, 1]`.
    pub playhead: f64,
    /// Rows in scene order.
    pub rows: Vec<DopeRow>,
}

impl DopeSheet {
    /// Build the sheet for `scene` at `frame`. All fractions are 0 on an empty timeline;
    /// bars and playhead past the duration are cut at 1.
    pub fn build(scene: &Scene, selection: Option<&PropertyPath>, frame: FrameIndex) -> Self {
        let duration = scene.duration;
        let rows = scene
            .objects
            .iter()
            .map(|obj| DopeRow {
                object_id: obj.id.clone(),
                color: obj.color.clone(),
                bars: obj
                    .motions
                    .iter()
                    .map(|m| {
                        let span = m.span();
                        let left = span.start.fraction_of(duration).min(1.0);
                        let right = span.end.fraction_of(duration).min(1.0);
                        DopeBar {
                            motion_name: m.name.clone(),
                            start_frame: span.start,
                            end_frame: span.end,
                            left,
                            width: right - left,
                            selected: selection.is_some_and(|p| {
                                p.object_id == obj.id && p.motion_name == m.name
                            }),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self {
            duration,
            playhead: frame.fraction_of(duration).min(1.0),
            rows,
        }
    }

    /// `(object, motion)` under a click at horizontal fraction `x` in row `row`.
    pub fn hit(&self, row: usize, x: f64) -> Option<(&str, &str)> {
        let r = self.rows.get(row)?;
        r.bars
            .iter()
            .find(|b| x >= b.left && x <= b.left + b.width)
            .map(|b| (r.object_id.as_str(), b.motion_name.as_str()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/dope_sheet.rs"]
mod tests;
