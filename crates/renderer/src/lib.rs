//! Renderer boundary for the parallax slider.
//!
//! The slider never issues graphics calls. It mutates planes held in a
//! [`Scene`] and a [`Renderer`] backend consumes that scene once per frame:
//!
//! ```text
//!   Slider::render ──▶ Plane (Transform + PlaneUniforms + Texture)
//!                              │ registered in
//!                              ▼
//!                           Scene ──▶ Renderer::render_frame()
//! ```
//!
//! - `plane` holds the per-slide transform and shader inputs behind the
//!   [`Positionable`] capability.
//! - `uniforms` mirrors the shader's uniform block as a `Pod` struct.
//! - `timeline` provides the paused, progress-driven tweens for the slide
//!   entrance scale and the global progress/titles chrome.
//! - `texture` decodes slide images off-thread and reports completions.

mod plane;
mod scene;
mod texture;
mod timeline;
mod uniforms;

pub use plane::{Plane, PlaneGeometry, Positionable, Transform, PLANE_SEGMENTS};
pub use scene::{NullRenderer, PlaneHandle, Renderer, Scene, TraceRenderer};
pub use texture::{
    Texture, TextureEvent, TextureLoad, TextureLoader, PLACEHOLDER_COLOR, PLACEHOLDER_SIZE,
};
pub use timeline::{Easing, ScaleTimeline, Timeline, TrackIndicators, TrackTimeline};
pub use uniforms::{PlaneUniforms, Uniform};
