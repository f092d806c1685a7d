//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit or ToggleProjection.
//! Events the UI overlay consumed never reach the mapper.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Toggle borderless fullscreen (F key)
    ToggleFullscreen,
    /// Switch between perspective and orthographic projection (P key)
    ToggleProjection,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases, key repeats and unbound keys
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<InputAction> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyP => Some(InputAction::ToggleProjection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed, false),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyP, ElementState::Pressed, false),
            Some(InputAction::ToggleProjection)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released, false);
        assert_eq!(action, None);
    }

    #[test]
    fn test_key_repeat_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::KeyP, ElementState::Pressed, true);
        assert_eq!(action, None);
    }

    #[test]
    fn test_unbound_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space, KeyCode::KeyR] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, false);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }
}
