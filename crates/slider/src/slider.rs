use renderer::{
    Plane, PlaneGeometry, PlaneUniforms, Positionable, Scene, Texture, TextureLoad,
    TextureLoader, Timeline, TrackIndicators, TrackTimeline,
};
use sliderconfig::{SlideEntry, SliderConfig};
use tracing::{debug, info, warn};

use crate::error::SliderError;
use crate::geometry::{ItemGeometry, Rect, TrackBounds, TrackLayout};
use crate::input::{Disposition, InputAdapter, InputEvent};
use crate::motion::MotionState;
use crate::sync::{sync_items, SlideItem};
use crate::viewport::Viewport;

/// Everything the slider reads from its host at construction time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderContext {
    pub viewport: Viewport,
    pub config: SliderConfig,
}

/// Owns the motion state, the slide items, and the page timeline, and keeps
/// the planes in a [`Scene`] in step with them.
pub struct Slider {
    context: SliderContext,
    track: Rect,
    motion: MotionState,
    input: InputAdapter,
    items: Vec<SlideItem>,
    timeline: TrackTimeline,
    textures: Option<TextureLoader>,
}

impl Slider {
    /// Measures `layout`, registers one plane per slide in `scene`, and
    /// starts decoding slide images in the background.
    pub fn new(
        context: SliderContext,
        layout: &TrackLayout,
        slides: &[SlideEntry],
        scene: &mut Scene,
    ) -> Result<Self, SliderError> {
        let last = layout.items.last().ok_or(SliderError::EmptyLayout)?;
        if slides.len() != layout.items.len() {
            return Err(SliderError::LayoutMismatch {
                expected: slides.len(),
                found: layout.items.len(),
            });
        }
        context.config.validate()?;

        let bounds = TrackBounds::measure(&layout.track, last);
        if bounds.is_degenerate() {
            warn!(
                track_width = layout.track.width,
                "slides fit inside the track; scrolling disabled"
            );
        }

        let config = context.config;
        let mut textures: Option<TextureLoader> = None;
        let mut items = Vec::with_capacity(slides.len());
        for (rect, slide) in layout.items.iter().zip(slides) {
            let geometry = ItemGeometry::measure(rect, &layout.track, &bounds, &context.viewport);
            let uniforms = PlaneUniforms::new(
                rect.width as f32,
                rect.height as f32,
                config.scale_min as f32,
                config.rgb_shift as f32,
            );
            let mut plane = Plane::new(slide.title.clone(), PlaneGeometry::default(), uniforms);
            plane.set_position(geometry.base_x, geometry.base_y);
            let handle = scene.register(plane);

            if let Some(path) = &slide.image {
                textures
                    .get_or_insert_with(TextureLoader::new)
                    .request(handle, path.clone());
            }
            items.push(SlideItem::new(
                slide.title.clone(),
                slide.image.clone(),
                geometry,
                handle,
                &config,
            ));
        }

        info!(
            slides = items.len(),
            max = bounds.max,
            touch = context.viewport.is_touch_device(),
            "slider ready"
        );

        Ok(Self {
            context,
            track: layout.track,
            motion: MotionState::new(bounds),
            input: InputAdapter::new(context.viewport.modality),
            timeline: TrackTimeline::new(items.len()),
            items,
            textures,
        })
    }

    /// Restricts drag starts to `area`. Hosts re-apply it after a resize.
    pub fn set_drag_area(&mut self, area: Option<Rect>) {
        self.input.set_drag_area(area);
    }

    pub fn drag_area(&self) -> Option<Rect> {
        self.input.drag_area()
    }

    /// One animation frame: integrate motion, drive the page timeline, then
    /// sync every item and its plane.
    pub fn render(&mut self, scene: &mut Scene) {
        self.apply_textures(scene);
        self.motion.integrate(self.context.config.ease);
        self.timeline.set_progress(self.motion.progress());
        self.sync(scene);
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> Disposition {
        self.input
            .handle(event, &mut self.motion, self.context.config.speed)
    }

    /// Re-measures everything for a new viewport and runs one sync pass with
    /// every item forced in.
    pub fn resize(
        &mut self,
        viewport: Viewport,
        layout: &TrackLayout,
        scene: &mut Scene,
    ) -> Result<(), SliderError> {
        let last = layout.items.last().ok_or(SliderError::EmptyLayout)?;
        if layout.items.len() != self.items.len() {
            return Err(SliderError::LayoutMismatch {
                expected: self.items.len(),
                found: layout.items.len(),
            });
        }

        self.motion.set_resizing(true);
        self.context.viewport = viewport;
        self.input.set_modality(viewport.modality);
        self.track = layout.track;

        let bounds = TrackBounds::measure(&layout.track, last);
        if bounds.is_degenerate() && !self.motion.bounds().is_degenerate() {
            warn!(
                track_width = layout.track.width,
                "slides fit inside the track after resize; scrolling disabled"
            );
        }
        self.motion.set_bounds(bounds);
        for (item, rect) in self.items.iter_mut().zip(&layout.items) {
            item.geometry = ItemGeometry::measure(rect, &layout.track, &bounds, &viewport);
            if let Some(plane) = scene.plane_mut(item.plane) {
                plane.set_mesh_size(rect.width, rect.height);
            }
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            max = bounds.max,
            "slider resized"
        );

        self.sync(scene);
        self.motion.set_resizing(false);
        Ok(())
    }

    /// Swaps the tunables; the next frame picks them up.
    pub fn set_config(&mut self, config: SliderConfig) -> Result<(), SliderError> {
        config.validate()?;
        self.context.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SliderConfig {
        &self.context.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.context.viewport
    }

    pub fn track(&self) -> &Rect {
        &self.track
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn items(&self) -> &[SlideItem] {
        &self.items
    }

    pub fn indicators(&self) -> TrackIndicators {
        self.timeline.indicators()
    }

    /// Whether any slide image is still decoding.
    pub fn textures_pending(&self) -> bool {
        self.textures
            .as_ref()
            .is_some_and(|loader| loader.pending() > 0)
    }

    /// Releases every plane this slider registered.
    pub fn destroy(self, scene: &mut Scene) {
        for item in &self.items {
            scene.release(item.plane);
        }
        debug!(slides = self.items.len(), "slider destroyed");
    }

    fn sync(&mut self, scene: &mut Scene) {
        sync_items(
            &mut self.items,
            &self.motion,
            self.context.viewport.width,
            &self.context.config,
            scene,
        );
    }

    fn apply_textures(&mut self, scene: &mut Scene) {
        let Some(loader) = self.textures.as_mut() else {
            return;
        };
        for event in loader.poll() {
            let Some(plane) = scene.plane_mut(event.plane) else {
                continue;
            };
            match event.result {
                TextureLoad::Loaded(texture) => {
                    debug!(source = %event.source.display(), "slide texture ready");
                    plane.set_texture(texture);
                }
                TextureLoad::Failed(reason) => {
                    warn!(
                        source = %event.source.display(),
                        %reason,
                        "slide texture failed; keeping placeholder"
                    );
                    plane.set_texture(Texture::placeholder());
                }
            }
        }
    }
}
