use crate::texture::Texture;
use crate::uniforms::{PlaneUniforms, Uniform};

/// Vertex subdivisions per axis; the vertex shear needs more than a quad.
pub const PLANE_SEGMENTS: u32 = 32;

/// Capability for scene objects that can be moved in screen space.
pub trait Positionable {
    fn set_position(&mut self, x: f64, y: f64);
    fn position(&self) -> (f64, f64);
}

/// Placement of a plane relative to the viewport centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Unit quad subdivided into `segments x segments` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneGeometry {
    pub segments: u32,
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self {
            segments: PLANE_SEGMENTS,
        }
    }
}

/// Shaded rectangle tracking one slide.
#[derive(Clone, Debug)]
pub struct Plane {
    label: String,
    geometry: PlaneGeometry,
    transform: Transform,
    uniforms: PlaneUniforms,
    texture: Texture,
}

impl Plane {
    /// Creates a plane with the placeholder texture already bound.
    pub fn new(label: impl Into<String>, geometry: PlaneGeometry, uniforms: PlaneUniforms) -> Self {
        let mut plane = Self {
            label: label.into(),
            geometry,
            transform: Transform::default(),
            uniforms,
            texture: Texture::placeholder(),
        };
        let [width, height] = uniforms.u_mesh_size;
        plane.set_mesh_size(width as f64, height as f64);
        plane.bind_texture_size();
        plane
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn geometry(&self) -> PlaneGeometry {
        self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn uniforms(&self) -> &PlaneUniforms {
        &self.uniforms
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn set_uniform(&mut self, uniform: Uniform) {
        self.uniforms.apply(uniform);
    }

    /// Scales the unit quad to the slide's pixel size and mirrors it into `uMeshSize`.
    pub fn set_mesh_size(&mut self, width: f64, height: f64) {
        self.transform.scale_x = width;
        self.transform.scale_y = height;
        self.uniforms
            .apply(Uniform::MeshSize([width as f32, height as f32]));
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
        self.bind_texture_size();
    }

    fn bind_texture_size(&mut self) {
        let size = [self.texture.width() as f32, self.texture.height() as f32];
        self.uniforms.apply(Uniform::ImageSize(size));
    }
}

impl Positionable for Plane {
    fn set_position(&mut self, x: f64, y: f64) {
        self.transform.x = x;
        self.transform.y = y;
    }

    fn position(&self) -> (f64, f64) {
        (self.transform.x, self.transform.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane() -> Plane {
        Plane::new(
            "Ocean",
            PlaneGeometry::default(),
            PlaneUniforms::new(360.0, 540.0, 0.65, 0.15),
        )
    }

    #[test]
    fn new_plane_scales_mesh_and_binds_placeholder() {
        let plane = plane();
        assert_eq!(plane.label(), "Ocean");
        assert_eq!(plane.geometry().segments, 32);
        assert_eq!(plane.transform().scale_x, 360.0);
        assert_eq!(plane.transform().scale_y, 540.0);
        assert!(plane.texture().is_placeholder());
        assert_eq!(plane.uniforms().u_image_size, [800.0, 600.0]);
    }

    #[test]
    fn position_round_trips_through_capability() {
        let mut plane = plane();
        plane.set_position(-120.5, 42.0);
        assert_eq!(plane.position(), (-120.5, 42.0));
    }

    #[test]
    fn resizing_mesh_updates_uniform() {
        let mut plane = plane();
        plane.set_mesh_size(200.0, 100.0);
        assert_eq!(plane.uniforms().u_mesh_size, [200.0, 100.0]);
        assert_eq!(plane.transform().scale_x, 200.0);
    }
}
