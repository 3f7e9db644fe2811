//! Video playback through a GStreamer `playbin` whose video output is an RGBA
//! `appsink`, so frames can be composited instead of shown directly.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use image::RgbaImage;

use crate::bus_monitor::{self, Readiness};
use crate::error::PlayerError;
use crate::gst_logger;
use crate::source::VideoSource;

/// Check that `path` names an existing file and make it absolute.
pub fn resolve_path(path: &Path) -> Result<PathBuf, PlayerError> {
    let metadata = std::fs::metadata(path).map_err(|source| PlayerError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(PlayerError::NotAFile(path.to_path_buf()));
    }
    std::path::absolute(path).map_err(|_| PlayerError::InvalidPath(path.to_path_buf()))
}

/// One open video resource.
pub struct PlayerHandle {
    path: PathBuf,
    pipeline: gst::Element,
    appsink: gst_app::AppSink,
    readiness: Readiness,
    frame: Option<RgbaImage>,
    stopped: bool,
}

impl PlayerHandle {
    /// Build a pipeline for `path`. Nothing is decoded until [`PlayerHandle::play`].
    ///
    /// Frames are scaled by the pipeline to `frame_size`, so the compositor can
    /// copy them without resampling on the UI thread.
    pub fn open(path: &Path, volume: f64, frame_size: (u32, u32)) -> Result<Self, PlayerError> {
        let path = resolve_path(path)?;
        let uri =
            url::Url::from_file_path(&path).map_err(|_| PlayerError::InvalidPath(path.clone()))?;

        gst::init()?;

        let (width, height) = frame_size;
        let caps = gst::Caps::builder("video/x-raw")
            .field("format", "RGBA")
            .field("width", width as i32)
            .field("height", height as i32)
            .field("pixel-aspect-ratio", gst::Fraction::new(1, 1))
            .build();
        // Keep only the newest frame; the compositor samples, it does not queue.
        let appsink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let pipeline = gst::ElementFactory::make("playbin")
            .name("overlay-player")
            .property("uri", uri.as_str())
            .property("video-sink", &appsink)
            .property("volume", volume)
            .build()?;

        gst_logger::log_player_created(&path, volume);

        Ok(PlayerHandle {
            path,
            pipeline,
            appsink,
            readiness: Readiness::default(),
            frame: None,
            stopped: false,
        })
    }

    /// Start playback. Returns immediately; readiness is observed through [`PlayerHandle::poll`].
    pub fn play(&self) -> Result<(), PlayerError> {
        let change = self.pipeline.set_state(gst::State::Playing)?;
        log::debug!("Pipeline state change to PLAYING: {:?}", change);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            log::warn!("Failed to stop pipeline for {}: {}", self.path.display(), e);
        }
        self.stopped = true;
        gst_logger::log_player_stopped(&self.path);
    }

    /// Drain pending bus messages and pick up the newest decoded frame.
    pub fn poll(&mut self) {
        for event in bus_monitor::poll_bus(&self.pipeline) {
            self.readiness.apply(event);
        }

        let mut latest = None;
        while let Some(sample) = self.appsink.try_pull_sample(gst::ClockTime::ZERO) {
            latest = Some(sample);
        }
        if let Some(sample) = latest {
            match sample_to_image(&sample) {
                Some(image) => self.frame = Some(image),
                None => log::warn!("Dropped a video sample with unreadable caps or buffer"),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_error(&self) -> Option<&str> {
        self.readiness.last_error()
    }
}

impl VideoSource for PlayerHandle {
    fn download_progress(&self) -> f64 {
        self.readiness.progress()
    }

    fn natural_width(&self) -> u32 {
        self.frame.as_ref().map_or(0, |frame| frame.width())
    }

    fn position(&self) -> Duration {
        let start = Instant::now();
        let position = self
            .pipeline
            .query_position::<gst::ClockTime>()
            .map(|ts| Duration::from_nanos(ts.nseconds()));
        gst_logger::log_position_query_complete(position, start);
        position.unwrap_or_default()
    }

    fn current_frame(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Copy an RGBA sample into a tightly packed image, dropping any row padding.
fn sample_to_image(sample: &gst::Sample) -> Option<RgbaImage> {
    let structure = sample.caps()?.structure(0)?;
    let width = structure.get::<i32>("width").ok()? as u32;
    let height = structure.get::<i32>("height").ok()? as u32;
    if width == 0 || height == 0 {
        return None;
    }

    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;
    let data = map.as_slice();

    let row = width as usize * 4;
    let stride = data.len() / height as usize;
    if stride < row {
        return None;
    }

    let mut pixels = Vec::with_capacity(row * height as usize);
    for line in data.chunks(stride).take(height as usize) {
        pixels.extend_from_slice(&line[..row]);
    }
    RgbaImage::from_raw(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");
        assert!(matches!(
            resolve_path(&missing),
            Err(PlayerError::NotFound { .. })
        ));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resolve_path(dir.path()),
            Err(PlayerError::NotAFile(_))
        ));
    }

    #[test]
    fn existing_file_resolves_to_absolute_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve_path(file.path()).unwrap();
        assert!(resolved.is_absolute());
        assert!(url::Url::from_file_path(&resolved).is_ok());
    }

    #[test]
    fn open_fails_before_building_a_pipeline_for_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlayerHandle::open(&dir.path().join("nope.webm"), 0.2, (800, 450));
        let err = result.err().unwrap();
        assert!(err.to_string().starts_with("Video file not found"));
    }
}
