use std::path::{Path, PathBuf};

use renderer::{PlaneHandle, Positionable, ScaleTimeline, Scene, Timeline, Uniform};
use sliderconfig::SliderConfig;

use crate::geometry::ItemGeometry;
use crate::motion::MotionState;
use crate::visibility::{evaluate, Evaluation};

/// One slide: its cached geometry, its plane, and its entrance timeline.
#[derive(Debug)]
pub struct SlideItem {
    pub(crate) title: String,
    pub(crate) image: Option<PathBuf>,
    pub(crate) geometry: ItemGeometry,
    pub(crate) plane: PlaneHandle,
    pub(crate) timeline: ScaleTimeline,
    pub(crate) evaluation: Evaluation,
    pub(crate) out: bool,
}

impl SlideItem {
    pub(crate) fn new(
        title: String,
        image: Option<PathBuf>,
        geometry: ItemGeometry,
        plane: PlaneHandle,
        config: &SliderConfig,
    ) -> Self {
        Self {
            title,
            image,
            geometry,
            plane,
            timeline: ScaleTimeline::new(config.scale_min, config.scale_max),
            evaluation: Evaluation::default(),
            out: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    pub fn geometry(&self) -> &ItemGeometry {
        &self.geometry
    }

    pub fn plane(&self) -> PlaneHandle {
        self.plane
    }

    /// Result of the most recent frame.
    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Whether the entrance timeline is frozen because the item left the view.
    pub fn is_out(&self) -> bool {
        self.out
    }

    pub fn timeline(&self) -> &ScaleTimeline {
        &self.timeline
    }
}

/// Pushes one frame of motion into `item` and its plane.
///
/// The entrance timeline is scrubbed with the `out` flag from the previous
/// frame, so an item keeps its last scale for one frame after it comes back.
pub(crate) fn sync_item(
    item: &mut SlideItem,
    motion: &MotionState,
    viewport_width: f64,
    config: &SliderConfig,
    scene: &mut Scene,
) {
    let evaluation = evaluate(
        &item.geometry,
        motion.current_rounded(),
        viewport_width,
        config.threshold,
    );
    item.evaluation = evaluation;

    let driven = !item.out;
    item.timeline.retarget(config.scale_min, config.scale_max);
    if driven {
        item.timeline.set_progress(evaluation.progress);
    }
    item.out = !(evaluation.visible || motion.is_resizing());

    let Some(plane) = scene.plane_mut(item.plane) else {
        tracing::warn!(plane = item.plane.index(), title = %item.title, "slide plane missing from scene");
        return;
    };
    plane.set_position(item.geometry.base_x + evaluation.translate, item.geometry.base_y);
    plane.set_uniform(Uniform::Velocity(motion.velocity() as f32));
    plane.set_uniform(Uniform::RgbShift(config.rgb_shift as f32));
    if driven {
        plane.set_uniform(Uniform::Scale(item.timeline.value() as f32));
    }
}

pub(crate) fn sync_items(
    items: &mut [SlideItem],
    motion: &MotionState,
    viewport_width: f64,
    config: &SliderConfig,
    scene: &mut Scene,
) {
    for item in items.iter_mut() {
        sync_item(item, motion, viewport_width, config, scene);
    }
}
