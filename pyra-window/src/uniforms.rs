use bytemuck::{Pod, Zeroable};
use pyra_core::Mat4;

/// Remaps OpenGL clip depth ([-1, 1]) to wgpu's [0, 1].
#[rustfmt::skip]
pub const GL_TO_WGPU_CLIP: Mat4 = Mat4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Per-frame uniform block; layout matches `Uniforms` in `shader.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Uniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub time: f32,
    pub orbit_radius: f32,
    _pad: [f32; 2],
}

impl Uniforms {
    /// `projection` is the OpenGL-style matrix; the clip remap is applied here.
    pub fn new(model: Mat4, view: Mat4, projection: Mat4, time: f32, orbit_radius: f32) -> Self {
        Self {
            model,
            view,
            projection: GL_TO_WGPU_CLIP * projection,
            time,
            orbit_radius,
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyra_core::Vec3;

    #[test]
    fn test_layout_matches_wgsl() {
        // three mat4x4<f32>, two f32, padded to 16-byte alignment
        assert_eq!(std::mem::size_of::<Uniforms>(), 208);
        let u = Uniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, 1.5, 2.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(floats[48], 1.5);
        assert_eq!(floats[49], 2.0);
    }

    #[test]
    fn test_clip_remap_maps_near_and_far() {
        let projection = Mat4::perspective(90.0, 1.0, 0.5, 20.0);
        let u = Uniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, projection, 0.0, 0.0);

        let near = u.projection.transform_point(Vec3::new(0.0, 0.0, -0.5));
        let far = u.projection.transform_point(Vec3::new(0.0, 0.0, -20.0));
        let near = near.perspective_divide().unwrap();
        let far = far.perspective_divide().unwrap();
        assert!(near.z.abs() < 1e-5, "{near:?}");
        assert!((far.z - 1.0).abs() < 1e-5, "{far:?}");
    }
}
