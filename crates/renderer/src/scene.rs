use anyhow::Result;

use crate::plane::{Plane, Positionable};

/// Stable reference to a plane registered in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneHandle(usize);

impl PlaneHandle {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Flat scene graph: every registered plane, in registration order.
///
/// Released slots stay empty so outstanding handles never alias a newer plane.
#[derive(Debug, Default)]
pub struct Scene {
    planes: Vec<Option<Plane>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plane: Plane) -> PlaneHandle {
        self.planes.push(Some(plane));
        PlaneHandle(self.planes.len() - 1)
    }

    pub fn plane(&self, handle: PlaneHandle) -> Option<&Plane> {
        self.planes.get(handle.0).and_then(Option::as_ref)
    }

    pub fn plane_mut(&mut self, handle: PlaneHandle) -> Option<&mut Plane> {
        self.planes.get_mut(handle.0).and_then(Option::as_mut)
    }

    pub fn release(&mut self, handle: PlaneHandle) -> Option<Plane> {
        self.planes.get_mut(handle.0).and_then(Option::take)
    }

    /// Live planes with their handles.
    pub fn planes(&self) -> impl Iterator<Item = (PlaneHandle, &Plane)> {
        self.planes
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|plane| (PlaneHandle(index), plane)))
    }

    pub fn len(&self) -> usize {
        self.planes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sink that turns a scene into pixels once per frame.
///
/// Backends that cannot reach a device should degrade to [`NullRenderer`]
/// rather than fail the frame loop.
pub trait Renderer {
    fn resize(&mut self, width: f64, height: f64);
    fn render_frame(&mut self, scene: &Scene) -> Result<()>;
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn resize(&mut self, _width: f64, _height: f64) {}

    fn render_frame(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }
}

/// Renderer that reports each frame through `tracing` instead of drawing.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frames: u64,
    viewport: (f64, f64),
}

impl TraceRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            frames: 0,
            viewport: (width, height),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn resize(&mut self, width: f64, height: f64) {
        tracing::debug!(width, height, "renderer viewport resized");
        self.viewport = (width, height);
    }

    fn render_frame(&mut self, scene: &Scene) -> Result<()> {
        let (width, height) = self.viewport;
        let half_width = width / 2.0;
        let mut drawn = 0usize;
        for (handle, plane) in scene.planes() {
            let (x, y) = plane.position();
            let half_extent = plane.transform().scale_x / 2.0;
            if x + half_extent < -half_width || x - half_extent > half_width {
                continue;
            }
            drawn += 1;
            tracing::trace!(
                plane = handle.index(),
                label = plane.label(),
                x,
                y,
                scale = plane.uniforms().u_scale,
                velo = plane.uniforms().u_velo,
                "draw plane"
            );
        }
        tracing::trace!(frame = self.frames, drawn, total = scene.len(), height, "frame rendered");
        self.frames += 1;
        Ok(())
    }
}
