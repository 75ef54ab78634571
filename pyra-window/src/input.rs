use pyra_core::MoveKeys;
use winit::keyboard::KeyCode;

/// Records a W/A/S/D transition. Returns false for keys that do not move the camera.
pub fn set_move_key(keys: &mut MoveKeys, code: KeyCode, pressed: bool) -> bool {
    let slot = match code {
        KeyCode::KeyW => &mut keys.forward,
        KeyCode::KeyS => &mut keys.back,
        KeyCode::KeyA => &mut keys.left,
        KeyCode::KeyD => &mut keys.right,
        _ => return false,
    };
    *slot = pressed;
    true
}

/// Unbounded pointer position built from raw mouse deltas.
///
/// A grabbed cursor stops at the window edge (or does not move at all), so
/// absolute positions cannot drive the camera past it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualPointer {
    x: f64,
    y: f64,
}

impl VirtualPointer {
    /// Adds a device delta and returns the new position.
    pub fn accumulate(&mut self, (dx, dy): (f64, f64)) -> (f64, f64) {
        self.x += dx;
        self.y += dy;
        (self.x, self.y)
    }
}
