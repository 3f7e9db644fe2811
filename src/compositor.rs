//! Per-tick compositing of the video frame and the text overlay.
//!
//! Each tick records one [`DrawingSession`], rasterizes it into the
//! [`CompositeSurface`] and commits the result. The fixed draw order is video,
//! backing rectangle, frame-rate label, position label; later layers occlude
//! earlier ones.

use image::Rgba;

use crate::clock::FrameClock;
use crate::config::{OverlayConfig, Point, Rect};
use crate::error::OverlayError;
use crate::source::VideoSource;
use crate::surface::CompositeSurface;
use crate::text::{TextPainter, TextRenderer};
use crate::timecode::format_position;

/// One retained drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Video {
        dest: Rect,
    },
    FillRect {
        rect: Rect,
        color: Rgba<u8>,
    },
    Text {
        text: String,
        origin: Point,
        size: f32,
        color: Rgba<u8>,
    },
}

/// Commands recorded for a single tick, replayed as one unit.
#[derive(Default)]
pub struct DrawingSession {
    ops: Vec<DrawOp>,
}

impl DrawingSession {
    /// Start a new session, discarding the previous tick's commands.
    pub fn open(&mut self) {
        self.ops.clear();
    }

    pub fn draw_video(&mut self, dest: Rect) {
        self.ops.push(DrawOp::Video { dest });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    pub fn draw_text(&mut self, text: String, origin: Point, size: f32, color: Rgba<u8>) {
        self.ops.push(DrawOp::Text {
            text,
            origin,
            size,
            color,
        });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

/// Text of the frame-rate label.
pub fn rate_label(rate: u64) -> String {
    format!("{} fps (iced)", rate)
}

pub struct Compositor {
    config: OverlayConfig,
    surface: CompositeSurface,
    painter: Box<dyn TextPainter>,
    session: DrawingSession,
    clock: FrameClock,
    rate: Option<u64>,
}

impl Compositor {
    /// Allocate the surface and start the frame clock, rendering text with system fonts.
    pub fn new(config: OverlayConfig) -> Result<Self, OverlayError> {
        let painter = Box::new(TextRenderer::new(&config));
        Self::with_painter(config, painter)
    }

    pub fn with_painter(
        config: OverlayConfig,
        painter: Box<dyn TextPainter>,
    ) -> Result<Self, OverlayError> {
        let (width, height) = config.pixel_size();
        let surface = CompositeSurface::new(width, height, config.dpi)?;
        log::info!(
            "Overlay prepared: {}x{} @ {} dpi, locale={}",
            surface.width(),
            surface.height(),
            surface.dpi(),
            config.locale
        );

        Ok(Compositor {
            config,
            surface,
            painter,
            session: DrawingSession::default(),
            clock: FrameClock::start(),
            rate: None,
        })
    }

    /// Composite one display refresh. Returns whether a new frame was committed.
    pub fn on_tick(&mut self, source: &dyn VideoSource) -> bool {
        let elapsed = self.clock.elapsed_ms();
        self.on_tick_at(source, elapsed)
    }

    /// [`Compositor::on_tick`] with the clock reading supplied by the caller.
    pub fn on_tick_at(&mut self, source: &dyn VideoSource, elapsed: u64) -> bool {
        // Still loading: leave the surface as it is and try again next tick.
        if !source.is_ready() {
            return false;
        }

        let Some(rate) = self.clock.tick_at(elapsed) else {
            log::trace!(
                "Tick at {}ms repeated within the same millisecond (previous {}ms), skipped",
                elapsed,
                self.clock.previous_elapsed()
            );
            return false;
        };
        self.rate = Some(rate);

        let config = &self.config;
        self.session.open();
        self.session.draw_video(self.surface.bounds());
        self.session.fill_rect(config.backing, config.backing_color);
        self.session.draw_text(
            rate_label(rate),
            config.rate_label.origin,
            config.font_size,
            config.rate_label.color,
        );
        self.session.draw_text(
            format_position(source.position()),
            config.position_label.origin,
            config.font_size,
            config.position_label.color,
        );

        self.render(source);
        self.surface.commit();
        true
    }

    fn render(&mut self, source: &dyn VideoSource) {
        for op in &self.session.ops {
            match op {
                DrawOp::Video { dest } => match source.current_frame() {
                    Some(frame) => self.surface.draw_frame(frame, *dest),
                    None => log::debug!("Source ready but no frame decoded yet"),
                },
                DrawOp::FillRect { rect, color } => self.surface.fill_rect(*rect, *color),
                DrawOp::Text {
                    text,
                    origin,
                    size,
                    color,
                } => self
                    .painter
                    .draw(&mut self.surface, text, *origin, *size, *color),
            }
        }
    }

    pub fn surface(&self) -> &CompositeSurface {
        &self.surface
    }

    /// Last displayed render-loop rate.
    pub fn rate(&self) -> Option<u64> {
        self.rate
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }
}
