/// Perspective projection state
use crate::math::Mat4;

/// Horizontal-FOV perspective projection.
///
/// `aspect` is width over height; frontends update it on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_x_degrees: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    pub fn new(fov_x_degrees: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        let mut projection = Self {
            fov_x_degrees,
            aspect: 1.0,
            z_near,
            z_far,
        };
        projection.set_aspect(width, height);
        projection
    }

    /// Recomputes the aspect ratio. Zero-sized surfaces (minimized windows)
    /// keep the previous value.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_x_degrees, self.aspect, self.z_near, self.z_far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(90.0, 800, 600, 0.1, 100.0)
    }
}
