use std::path::PathBuf;

use thiserror::Error;

/// Failures while opening or driving a video pipeline.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Video file not found: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),
    #[error("Invalid video path: {0}")]
    InvalidPath(PathBuf),
    #[error("Failed to initialize GStreamer: {0}")]
    Init(#[from] gstreamer::glib::Error),
    #[error("Failed to build pipeline: {0}")]
    Pipeline(#[from] gstreamer::glib::BoolError),
    #[error("Failed to change pipeline state: {0}")]
    StateChange(#[from] gstreamer::StateChangeError),
}

/// Failures while preparing the composite surface.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Cannot allocate an empty {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
}

/// Anything that can go wrong while handling a dropped file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Show an error to the user in a blocking dialog.
///
/// This is the only user-facing error channel; the window stays open afterwards.
pub fn show_error_dialog(message: &str) {
    log::error!("{}", message);
    rfd::MessageDialog::new()
        .set_title("Error")
        .set_description(message)
        .set_level(rfd::MessageLevel::Error)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
