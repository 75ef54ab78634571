/// Terminal key and mouse mapping onto camera input
use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use pyra_core::MoveKeys;

/// Approximate pixel size of one terminal cell.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Move,
    Ignored,
}

/// Terminals report presses, not holds: a movement key seen during a frame
/// counts as held for that frame.
pub fn press_key(keys: &mut MoveKeys, code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            keys.forward = true;
            KeyAction::Move
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            keys.back = true;
            KeyAction::Move
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            keys.left = true;
            KeyAction::Move
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            keys.right = true;
            KeyAction::Move
        }
        _ => KeyAction::Ignored,
    }
}

/// Pointer position in approximate pixels, for motion and drag events.
pub fn pointer_position(event: &MouseEvent) -> Option<(f64, f64)> {
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some((
            event.column as f64 * CELL_WIDTH_PX,
            event.row as f64 * CELL_HEIGHT_PX,
        )),
        _ => None,
    }
}

/// Viewport size in approximate pixels, so the projection aspect matches
/// what is on screen.
pub fn viewport_pixels(columns: u16, rows: u16) -> (u32, u32) {
    (
        (columns as f64 * CELL_WIDTH_PX) as u32,
        (rows as f64 * CELL_HEIGHT_PX) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_wasd_and_arrows_set_keys() {
        let mut keys = MoveKeys::default();
        assert_eq!(press_key(&mut keys, KeyCode::Char('w')), KeyAction::Move);
        assert_eq!(press_key(&mut keys, KeyCode::Left), KeyAction::Move);
        assert!(keys.forward && keys.left);
        assert!(!keys.back && !keys.right);
    }

    #[test]
    fn test_quit_keys() {
        let mut keys = MoveKeys::default();
        assert_eq!(press_key(&mut keys, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press_key(&mut keys, KeyCode::Esc), KeyAction::Quit);
        assert_eq!(press_key(&mut keys, KeyCode::Char('x')), KeyAction::Ignored);
        assert!(!keys.any());
    }

    #[test]
    fn test_pointer_scaled_to_pixels() {
        let moved = mouse(MouseEventKind::Moved, 10, 3);
        assert_eq!(pointer_position(&moved), Some((80.0, 48.0)));

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1);
        assert_eq!(pointer_position(&drag), Some((8.0, 16.0)));

        let click = mouse(MouseEventKind::Down(MouseButton::Left), 1, 1);
        assert_eq!(pointer_position(&click), None);
    }

    #[test]
    fn test_viewport_pixels() {
        assert_eq!(viewport_pixels(80, 24), (640, 384));
    }
}
