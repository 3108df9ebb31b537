use bytemuck::{Pod, Zeroable};

/// Uniform block consumed by the plane vertex/fragment shaders.
///
/// Field order mirrors the GLSL declaration so a backend can upload
/// [`PlaneUniforms::as_bytes`] without repacking.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneUniforms {
    pub u_mesh_size: [f32; 2],
    pub u_image_size: [f32; 2],
    pub u_time: f32,
    pub u_velo: f32,
    pub u_scale: f32,
    pub u_rgb_shift: f32,
}

unsafe impl Zeroable for PlaneUniforms {}
unsafe impl Pod for PlaneUniforms {}

/// A single named uniform write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Uniform {
    Time(f32),
    Velocity(f32),
    Scale(f32),
    RgbShift(f32),
    MeshSize([f32; 2]),
    ImageSize([f32; 2]),
}

impl Uniform {
    /// GLSL identifier the value is bound to.
    pub fn name(&self) -> &'static str {
        match self {
            Uniform::Time(_) => "uTime",
            Uniform::Velocity(_) => "uVelo",
            Uniform::Scale(_) => "uScale",
            Uniform::RgbShift(_) => "uRgbShift",
            Uniform::MeshSize(_) => "uMeshSize",
            Uniform::ImageSize(_) => "uImageSize",
        }
    }
}

impl PlaneUniforms {
    pub fn new(mesh_width: f32, mesh_height: f32, scale: f32, rgb_shift: f32) -> Self {
        Self {
            u_mesh_size: [mesh_width, mesh_height],
            u_image_size: [0.0, 0.0],
            u_time: 0.0,
            u_velo: 0.0,
            u_scale: scale,
            u_rgb_shift: rgb_shift,
        }
    }

    pub fn apply(&mut self, uniform: Uniform) {
        match uniform {
            Uniform::Time(value) => self.u_time = value,
            Uniform::Velocity(value) => self.u_velo = value,
            Uniform::Scale(value) => self.u_scale = value,
            Uniform::RgbShift(value) => self.u_rgb_shift = value,
            Uniform::MeshSize(size) => self.u_mesh_size = size,
            Uniform::ImageSize(size) => self.u_image_size = size,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<PlaneUniforms>(), 32);
        assert_eq!(std::mem::align_of::<PlaneUniforms>(), 16);
    }

    #[test]
    fn apply_writes_matching_field() {
        let mut uniforms = PlaneUniforms::new(300.0, 400.0, 0.65, 0.15);
        uniforms.apply(Uniform::Velocity(0.25));
        uniforms.apply(Uniform::ImageSize([800.0, 600.0]));
        assert_eq!(uniforms.u_velo, 0.25);
        assert_eq!(uniforms.u_image_size, [800.0, 600.0]);
        assert_eq!(uniforms.u_mesh_size, [300.0, 400.0]);

        let bytes = uniforms.as_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..4], &300.0_f32.to_ne_bytes());
        assert_eq!(&bytes[20..24], &0.25_f32.to_ne_bytes());
    }

    #[test]
    fn uniform_names_match_shader() {
        assert_eq!(Uniform::Velocity(0.0).name(), "uVelo");
        assert_eq!(Uniform::RgbShift(0.0).name(), "uRgbShift");
    }
}
