// One error type for the whole viewer.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating (or re-creating) the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the pixel buffer to the window failed
    #[error("Frame source error: {0}")]
    Source(String), // The frame source could not produce a frame
    #[error("Frame log error: {0}")]
    FrameLog(#[from] std::io::Error), // Appending to the joint log failed
    #[error("Config error: {0}")]
    Config(String), // Reading/parsing/writing body_viewer.toml failed
}
