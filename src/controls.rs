// Keyboard → viewer commands.
//   Esc / Ctrl+C  quit          F  fullscreen      R  depth registration
//   M  depth mirroring          P  skeleton profile T  body features
//   Space  pause

use minifb::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleFullscreen,
    ToggleRegistration,
    ToggleMirroring,
    CycleSkeletonProfile,
    CycleBodyFeatures,
    TogglePause,
}

pub fn command_for(key: Key, ctrl: bool) -> Option<Command> {
    match key {
        Key::C if ctrl => Some(Command::Quit),
        Key::Escape => Some(Command::Quit),
        Key::F => Some(Command::ToggleFullscreen),
        Key::R => Some(Command::ToggleRegistration),
        Key::M => Some(Command::ToggleMirroring),
        Key::P => Some(Command::CycleSkeletonProfile),
        Key::T => Some(Command::CycleBodyFeatures),
        Key::Space => Some(Command::TogglePause),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl WindowMode {
    pub fn toggled(self) -> Self {
        match self {
            WindowMode::Windowed => WindowMode::Fullscreen,
            WindowMode::Fullscreen => WindowMode::Windowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for(Key::Escape, false), Some(Command::Quit));
        assert_eq!(command_for(Key::C, true), Some(Command::Quit));
        assert_eq!(command_for(Key::C, false), None);
        assert_eq!(command_for(Key::F, false), Some(Command::ToggleFullscreen));
        assert_eq!(command_for(Key::R, false), Some(Command::ToggleRegistration));
        assert_eq!(command_for(Key::M, false), Some(Command::ToggleMirroring));
        assert_eq!(command_for(Key::P, false), Some(Command::CycleSkeletonProfile));
        assert_eq!(command_for(Key::T, false), Some(Command::CycleBodyFeatures));
        assert_eq!(command_for(Key::Space, false), Some(Command::TogglePause));
        assert_eq!(command_for(Key::Q, false), None);
    }

    #[test]
    fn window_mode_flips() {
        assert_eq!(WindowMode::default().toggled(), WindowMode::Fullscreen);
        assert_eq!(WindowMode::Fullscreen.toggled(), WindowMode::Windowed);
    }
}
