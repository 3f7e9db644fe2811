use std::time::Duration;

use image::RgbaImage;

/// Playback state the compositor samples on every tick.
///
/// Values are read opportunistically; nothing here waits on the decoder.
pub trait VideoSource {
    /// Fraction of the media available locally, in `[0, 1]`.
    fn download_progress(&self) -> f64;

    /// Width of the decoded video in pixels, `0` until the first frame arrives.
    fn natural_width(&self) -> u32;

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Most recent decoded frame.
    fn current_frame(&self) -> Option<&RgbaImage>;

    /// Whether a tick may draw this source.
    fn is_ready(&self) -> bool {
        self.download_progress() >= 1.0 && self.natural_width() != 0
    }
}
