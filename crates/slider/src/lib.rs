//! Motion and visibility engine for an infinitely wrapping image carousel.
//!
//! A [`Slider`] keeps one scalar scroll position that eases toward a target
//! set by drag, touch, and wheel input. Each frame every slide maps that
//! position into its own wrap interval, which decides where its plane sits,
//! whether it is on screen, and how far its entrance scale has progressed.
//!
//! ```text
//!   InputEvent ──▶ InputAdapter ──▶ MotionState.target
//!                                        │ integrate(ease)
//!                                        ▼
//!                     current_rounded ──▶ visibility::evaluate (per item)
//!                                        │
//!                                        ▼
//!                        sync: plane position, uVelo, uRgbShift, uScale
//! ```

mod error;
mod geometry;
mod input;
mod math;
mod motion;
mod slider;
mod sync;
mod viewport;
mod visibility;

pub use error::SliderError;
pub use geometry::{ItemGeometry, Point, Rect, TrackBounds, TrackLayout};
pub use input::{Disposition, InputAdapter, InputEvent, PointerDevice, PointerSample, WHEEL_FACTOR};
pub use math::{clamp, lerp, round_hundredths, wrap};
pub use motion::{DragState, MotionState, VELOCITY_GAIN};
pub use slider::{Slider, SliderContext};
pub use sync::SlideItem;
pub use viewport::{InputModality, Viewport};
pub use visibility::{classify, evaluate, Evaluation};
