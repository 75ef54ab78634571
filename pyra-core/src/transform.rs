/// Model transforms composed by matrix multiplication
use crate::math::{Mat4, Vec3};

/// Rotation state around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation applied X first, then Y, then Z.
    pub fn rotation_matrix(rotation: &RotationState) -> Mat4 {
        Mat4::rotation_z(rotation.z) * Mat4::rotation_y(rotation.y) * Mat4::rotation_x(rotation.x)
    }

    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::translation(x, y, z)
    }

    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4::scale(sx, sy, sz)
    }

    /// `translation * rotationZ * rotationY * rotationX * scale`
    pub fn model_matrix(translation: Vec3, rotation: &RotationState, scale: Vec3) -> Mat4 {
        Self::translation_matrix(translation.x, translation.y, translation.z)
            * Self::rotation_matrix(rotation)
            * Self::scale_matrix(scale.x, scale.y, scale.z)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        *projection * *view * *model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(10.0, 20.0, 30.0);
        assert!((state.x - 10.0).abs() < 1e-6);
        assert!((state.y - 20.0).abs() < 1e-6);
        assert!((state.z - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert_eq!(matrix, Mat4::IDENTITY);
    }

    #[test]
    fn test_model_matrix_order() {
        // Scale first, then rotate a quarter turn about z, then translate.
        let model = Transform::model_matrix(
            Vec3::new(0.0, 0.0, -5.0),
            &RotationState::new(0.0, 0.0, 90.0),
            Vec3::splat(2.0),
        );
        let p = model.transform_point(Vec3::X).truncate();
        assert!((p - Vec3::new(0.0, 2.0, -5.0)).length() < 1e-5, "{p:?}");
    }

    #[test]
    fn test_mvp_is_projection_view_model() {
        let model = Transform::translation_matrix(1.0, 0.0, 0.0);
        let view = Transform::translation_matrix(0.0, 0.0, -3.0);
        let projection = Mat4::perspective(90.0, 1.0, 0.1, 10.0);
        let mvp = Transform::mvp_matrix(&model, &view, &projection);
        assert_eq!(mvp, projection * (view * model));
    }
}
