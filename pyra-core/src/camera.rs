/// First-person camera driven by pointer motion and held movement keys
use crate::config::CameraConfig;
use crate::math::{Mat4, Vec3};

pub const PITCH_LIMIT: f32 = 89.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_SPEED: f32 = 2.5;

/// Movement keys held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Position plus yaw/pitch orientation (degrees).
///
/// `front` is kept unit length and `pitch` within [-89, 89] after every
/// update. `up` never changes once constructed.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    sensitivity: f32,
    speed: f32,
    last_pointer: Option<(f64, f64)>,
}

impl FlyCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position,
            front: front_from_angles(yaw, pitch),
            up: Vec3::Y,
            yaw,
            pitch,
            sensitivity: DEFAULT_SENSITIVITY,
            speed: DEFAULT_SPEED,
            last_pointer: None,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(Vec3::from(config.position), config.yaw, config.pitch)
            .with_sensitivity(config.sensitivity)
            .with_speed(config.speed)
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Feeds an absolute cursor position.
    ///
    /// The first position after construction or `reset_pointer` only becomes
    /// the reference; orientation changes start with the next one. Screen y
    /// grows downward, so moving the pointer up raises the pitch.
    pub fn on_pointer_motion(&mut self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.last_pointer.replace((x, y)) else {
            return;
        };

        let dx = (x - last_x) as f32 * self.sensitivity;
        let dy = (last_y - y) as f32 * self.sensitivity;

        self.yaw += dx;
        self.pitch = (self.pitch + dy).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);

        log::trace!("camera yaw={:.2} pitch={:.2}", self.yaw, self.pitch);
    }

    /// Forgets the last pointer position, e.g. when the cursor leaves the window.
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
    }

    /// Moves the camera for one frame; `dt` is the elapsed time in seconds.
    pub fn update(&mut self, keys: MoveKeys, dt: f32) {
        if !keys.any() {
            return;
        }

        let step = self.speed * dt;
        let right = self.front.cross(self.up).normalized();

        if keys.forward {
            self.position += self.front * step;
        }
        if keys.back {
            self.position -= self.front * step;
        }
        if keys.left {
            self.position -= right * step;
        }
        if keys.right {
            self.position += right * step;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, -90.0, 0.0)
    }
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = FlyCamera::default();
        assert!((camera.front() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert_eq!(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_first_pointer_event_only_records() {
        let mut camera = FlyCamera::default();
        camera.on_pointer_motion(400.0, 300.0);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);

        camera.on_pointer_motion(410.0, 290.0);
        assert!((camera.yaw() - -89.0).abs() < 1e-5);
        assert!((camera.pitch() - 1.0).abs() < 1e-5);

        camera.reset_pointer();
        camera.on_pointer_motion(0.0, 0.0);
        assert!((camera.yaw() - -89.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut camera = FlyCamera::default();
        let (mut x, mut y) = (0.0f64, 0.0f64);
        for _ in 0..2000 {
            x += rng.random_range(-5000.0..5000.0);
            y += rng.random_range(-5000.0..5000.0);
            camera.on_pointer_motion(x, y);
            assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&camera.pitch()));
            assert!((camera.front().length() - 1.0).abs() < 1e-5);
        }

        camera.on_pointer_motion(x, y - 1.0e7);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.on_pointer_motion(x, y + 1.0e7);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut camera = FlyCamera::new(Vec3::new(1.0, 2.0, 3.0), 30.0, 10.0);
        for dt in [0.0, 0.016, 1.0, 1000.0] {
            camera.update(MoveKeys::default(), dt);
            assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_forward_moves_along_front() {
        let mut camera = FlyCamera::new(Vec3::new(1.0, 0.0, 0.0), 15.0, -20.0).with_speed(5.0);
        let before = camera.position();
        let keys = MoveKeys {
            forward: true,
            ..Default::default()
        };
        camera.update(keys, 0.1);
        let moved = camera.position() - before;
        assert!((moved - camera.front() * 0.5).length() < 1e-5);
    }

    #[test]
    fn test_strafe_is_perpendicular() {
        let mut camera = FlyCamera::default().with_speed(1.0);
        let keys = MoveKeys {
            right: true,
            ..Default::default()
        };
        camera.update(keys, 1.0);
        assert!((camera.position() - Vec3::X).length() < 1e-5);

        let keys = MoveKeys {
            left: true,
            back: true,
            ..Default::default()
        };
        camera.update(keys, 1.0);
        assert!((camera.position() - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_view_matrix_centers_position() {
        let camera = FlyCamera::new(Vec3::new(3.0, -1.0, 2.0), 45.0, 30.0);
        let p = camera.view_matrix().transform_point(camera.position());
        assert!(p.truncate().length() < 1e-5);
    }
}
