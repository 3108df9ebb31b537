use crate::viewport::Viewport;

/// Share of the viewport an item that starts on screen may travel right
/// before it wraps.
const ENTRY_SPAN: f64 = 0.775;
/// Complement of [`ENTRY_SPAN`]; offsets items that start off screen.
const EXIT_SPAN: f64 = 0.225;
/// Share of the track width folded into the wrap offset.
const TRACK_SHARE: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Client-space bounding box as measured by the host layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

/// Measured track element and the slides laid out inside it, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackLayout {
    pub track: Rect,
    pub items: Vec<Rect>,
}

/// Scroll limits. `min` is the resting position, `max` the furthest point
/// left; `max <= min` always.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for TrackBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

impl TrackBounds {
    /// Derives bounds from the track and its last slide. Content narrower
    /// than the track yields a degenerate `max == 0` rather than a positive
    /// limit.
    pub fn measure(track: &Rect, last_item: &Rect) -> Self {
        let max = -(last_item.right() - track.width - track.left);
        Self {
            min: 0.0,
            max: max.min(0.0),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == 0.0
    }
}

/// Cached measurements and wrap interval for one slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemGeometry {
    pub left: f64,
    pub right: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
    /// Start of the wrap interval (inclusive).
    pub min_bound: f64,
    /// Far end of the wrap interval (exclusive).
    pub max_bound: f64,
    /// Plane offset from the viewport centre at zero scroll.
    pub base_x: f64,
    pub base_y: f64,
}

impl ItemGeometry {
    pub fn measure(rect: &Rect, track: &Rect, bounds: &TrackBounds, viewport: &Viewport) -> Self {
        let vw = viewport.width;
        let left = rect.left;

        let min_bound = if left < vw {
            vw * ENTRY_SPAN
        } else {
            -(vw * EXIT_SPAN - track.width * TRACK_SHARE)
        };
        let max_bound = if left > vw {
            bounds.max - vw * ENTRY_SPAN
        } else {
            bounds.max + (vw * EXIT_SPAN - track.width * TRACK_SHARE)
        };

        Self {
            left,
            right: rect.right(),
            width: rect.width,
            top: rect.top,
            height: rect.height,
            min_bound,
            max_bound,
            base_x: (left + rect.width / 2.0) - vw / 2.0,
            base_y: (rect.top + rect.height / 2.0) - viewport.height / 2.0,
        }
    }
}
