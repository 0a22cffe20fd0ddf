// What you SEE:
// • The depth stream as a grayscale image filling the window.
// • Each tracked person tinted in their body color, the floor tinted blue.
// • Skeleton joints (green, blue-ish when the hand grips) and bones (gray when unsure).
// Keys: ESC/Ctrl+C quit, F fullscreen, R registration, M mirroring,
//       P skeleton profile, T body features, SPACE pause.
// Every frame's joint positions are appended to the log file (out.txt by default).

mod color;
mod config;
mod controls;
mod depth;
mod draw;
mod error;
mod logger;
mod overlay;
mod skeleton;
mod source;
mod types;
mod visualizer;

use config::{Config, DEFAULT_CONFIG_PATH};
use controls::{Command, WindowMode};
use draw::Drawer;
use error::Error;
use logger::FrameLogger;
use source::{FrameSource, SyntheticSource};
use types::FrameBuffer;
use visualizer::BodyVisualizer;

fn main() -> Result<(), Error> {
    env_logger::init();

    let config = Config::load_or_default(DEFAULT_CONFIG_PATH)?;

    /* --- Frame source + streams --- */
    let mut source = SyntheticSource::new(config.source.width, config.source.height);
    log::info!(
        "skeleton profile: {}, body features: {}",
        source.skeleton_profile().label(),
        source.default_body_features().label()
    );

    /* --- Window + reusable screen buffer --- */
    let mut drawer = Drawer::new(&config.window)?;
    let (w, h) = drawer.size();
    let mut screen = FrameBuffer::new(w, h);
    let mut mode = WindowMode::Windowed;
    let mut paused = false;

    let mut visualizer = BodyVisualizer::new(FrameLogger::new(&config.log_path));
    log::info!("logging joints to {}", config.log_path);

    /* ------------------------------ Main loop ------------------------------ */
    'running: while drawer.is_open() {
        // 1) Pull a frame; the visualizer renders + logs it inside the callback.
        if !paused {
            source.update(&mut |frame| visualizer.on_frame_ready(frame))?;
        }

        // 2) Keys pressed since the last present.
        for command in drawer.commands() {
            match command {
                Command::Quit => break 'running,
                Command::ToggleFullscreen => {
                    mode = mode.toggled();
                    drawer.set_mode(mode, &config.window)?;
                    log::info!("window mode: {:?}", mode);
                }
                Command::ToggleRegistration => {
                    let enabled = !source.registration_enabled();
                    source.enable_registration(enabled);
                    log::info!("depth registration: {}", if enabled { "on" } else { "off" });
                }
                Command::ToggleMirroring => {
                    let enabled = !source.mirroring_enabled();
                    source.enable_mirroring(enabled);
                    log::info!("depth mirroring: {}", if enabled { "on" } else { "off" });
                }
                Command::CycleSkeletonProfile => {
                    let profile = source.skeleton_profile().next();
                    source.set_skeleton_profile(profile);
                    log::info!("Skeleton Profile: {}", profile.label());
                }
                Command::CycleBodyFeatures => {
                    let features = source.default_body_features().next();
                    source.set_default_body_features(features);
                    log::info!("Default Body Features: {}", features.label());
                }
                Command::TogglePause => {
                    paused = !paused;
                    log::info!("{}", if paused { "paused" } else { "resumed" });
                }
            }
        }

        // 3) Clear to black, draw back to front, show it.
        let (w, h) = drawer.size();
        screen.resize(w, h);
        screen.clear(0);
        visualizer.draw_to(&mut screen);
        drawer.present(&screen)?;
    }

    let logger = visualizer.logger();
    log::info!(
        "window closed after {} frames, joint log at {}",
        logger.frame_number(),
        logger.path().display()
    );
    Ok(())
}
