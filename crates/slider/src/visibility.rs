use crate::geometry::ItemGeometry;
use crate::math::{clamp, wrap};

/// Per-item result of a frame evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Evaluation {
    /// Horizontal offset applied on top of the item's resting position.
    pub translate: f64,
    pub visible: bool,
    /// How far the item has travelled through the viewport, in `[0, 1]`.
    pub progress: f64,
}

/// Maps the global scroll position into `item`'s wrap interval and derives
/// visibility and travel progress from the result.
pub fn evaluate(
    item: &ItemGeometry,
    current_rounded: f64,
    viewport_width: f64,
    threshold: f64,
) -> Evaluation {
    let translate = wrap(item.min_bound, item.max_bound, current_rounded);
    classify(item, translate, viewport_width, threshold)
}

/// Visibility and progress for an already wrapped `translate`.
pub fn classify(
    item: &ItemGeometry,
    translate: f64,
    viewport_width: f64,
    threshold: f64,
) -> Evaluation {
    let start = item.left + translate;
    let end = item.right + translate;
    let visible = start < threshold + viewport_width && end > -threshold;
    let span = viewport_width + item.width;
    let progress = if span > 0.0 {
        clamp(0.0, 1.0, 1.0 - (translate + item.left + item.width) / span)
    } else {
        0.0
    };

    Evaluation {
        translate,
        visible,
        progress,
    }
}
