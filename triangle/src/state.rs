use winit::event::VirtualKeyCode;

/// Runtime state mutated by the event-handling half of the frame loop.
///
/// Replaces the process-wide `quit`/`fullScreen` globals of the original
/// demo with a value owned by [`crate::app::App::run`].
pub struct DemoState {
    pub quit: bool,
    pub fullscreen: bool,
}

impl DemoState {
    pub fn new() -> Self {
        Self {
            quit: false,
            fullscreen: false,
        }
    }

    pub fn close_requested(&mut self) {
        self.quit = true;
    }

    /// Applies a key-release event. Returns true when the window display
    /// mode changed and the caller must switch fullscreen on or off.
    pub fn key_released(&mut self, key: VirtualKeyCode) -> bool {
        match key {
            VirtualKeyCode::Escape => {
                self.quit = true;
                false
            }
            VirtualKeyCode::F => {
                self.fullscreen = !self.fullscreen;
                true
            }
            _ => false,
        }
    }
}

impl Default for DemoState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_release_quits() {
        let mut state = DemoState::new();

        let mode_changed = state.key_released(VirtualKeyCode::Escape);

        assert!(state.quit);
        assert!(!mode_changed);
    }

    #[test]
    fn f_release_toggles_fullscreen_once() {
        let mut state = DemoState::new();

        assert!(state.key_released(VirtualKeyCode::F));
        assert!(state.fullscreen);
        assert!(!state.quit);
    }

    #[test]
    fn two_f_releases_restore_windowed_mode() {
        let mut state = DemoState::new();

        state.key_released(VirtualKeyCode::F);
        state.key_released(VirtualKeyCode::F);

        assert!(!state.fullscreen);
    }

    #[test]
    fn unrelated_keys_change_nothing() {
        let mut state = DemoState::new();

        let mode_changed = state.key_released(VirtualKeyCode::Space);

        assert!(!mode_changed);
        assert!(!state.quit);
        assert!(!state.fullscreen);
    }

    #[test]
    fn close_request_quits() {
        let mut state = DemoState::new();

        state.close_requested();

        assert!(state.quit);
    }
}
