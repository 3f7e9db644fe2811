//! Off-screen pixel buffer the overlay is composited into.
//!
//! Pixels are 32-bit RGBA with premultiplied alpha. The compositor is the only
//! writer; the window reads the snapshot handle published by [`CompositeSurface::commit`],
//! so it never sees a frame that is still being drawn.

use iced::widget::image::Handle;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::config::Rect;
use crate::error::OverlayError;

pub struct CompositeSurface {
    pixels: RgbaImage,
    dpi: u32,
    snapshot: Option<Handle>,
    commits: u64,
}

impl CompositeSurface {
    /// Allocate a transparent surface of `width x height` pixels.
    pub fn new(width: u32, height: u32, dpi: u32) -> Result<Self, OverlayError> {
        if width == 0 || height == 0 {
            return Err(OverlayError::EmptySurface { width, height });
        }
        log::debug!("Allocated composite surface {}x{} @ {} dpi", width, height, dpi);
        Ok(CompositeSurface {
            pixels: RgbaImage::new(width, height),
            dpi,
            snapshot: None,
            commits: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Rectangle covering the whole surface.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Copy `frame` into `dest`, stretching it to fit.
    pub fn draw_frame(&mut self, frame: &RgbaImage, dest: Rect) {
        let width = dest.width.round().max(0.0) as u32;
        let height = dest.height.round().max(0.0) as u32;
        if width == 0 || height == 0 || frame.width() == 0 || frame.height() == 0 {
            return;
        }

        let x = dest.x.round() as i64;
        let y = dest.y.round() as i64;
        if frame.dimensions() == (width, height) {
            imageops::replace(&mut self.pixels, frame, x, y);
        } else {
            let scaled = imageops::resize(frame, width, height, FilterType::Triangle);
            imageops::replace(&mut self.pixels, &scaled, x, y);
        }
    }

    /// Fill `rect` with a straight-alpha `color`, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let x0 = rect.x.round().max(0.0) as u32;
        let y0 = rect.y.round().max(0.0) as u32;
        let x1 = ((rect.x + rect.width).round().max(0.0) as u32).min(self.width());
        let y1 = ((rect.y + rect.height).round().max(0.0) as u32).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x as i32, y as i32, color);
            }
        }
    }

    /// Composite a straight-alpha `color` over the pixel at `(x, y)`.
    /// Coordinates outside the surface are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let alpha = color[3] as u32;
        if alpha == 0 {
            return;
        }

        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        if alpha == 255 {
            *dst = color;
            return;
        }

        let inverse = 255 - alpha;
        for channel in 0..3 {
            let src = color[channel] as u32 * alpha / 255;
            dst[channel] = (src + dst[channel] as u32 * inverse / 255) as u8;
        }
        dst[3] = (alpha + dst[3] as u32 * inverse / 255) as u8;
    }

    /// Publish the current pixels to the display.
    pub fn commit(&mut self) {
        // Every committed frame starts with an opaque video layer, so the
        // premultiplied bytes equal their straight-alpha form.
        self.snapshot = Some(Handle::from_rgba(
            self.width(),
            self.height(),
            self.pixels.as_raw().clone(),
        ));
        self.commits += 1;
        log::trace!("Surface commit #{}", self.commits);
    }

    /// Last committed snapshot, if any frame has been composited yet.
    pub fn snapshot(&self) -> Option<&Handle> {
        self.snapshot.as_ref()
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const GRAY: Rgba<u8> = Rgba([211, 211, 211, 255]);

    #[test]
    fn empty_surface_is_rejected() {
        assert!(matches!(
            CompositeSurface::new(0, 10, 96),
            Err(OverlayError::EmptySurface { width: 0, height: 10 })
        ));
    }

    #[test]
    fn new_surface_is_transparent_and_uncommitted() {
        let surface = CompositeSurface::new(4, 3, 96).unwrap();
        assert!(surface.pixels().pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
        assert!(surface.snapshot().is_none());
        assert_eq!(surface.commits(), 0);
    }

    #[test]
    fn frame_is_stretched_to_destination() {
        let mut surface = CompositeSurface::new(8, 6, 96).unwrap();
        let frame = RgbaImage::from_pixel(2, 2, GREEN);
        let bounds = surface.bounds();
        surface.draw_frame(&frame, bounds);
        assert!(surface.pixels().pixels().all(|p| *p == GREEN));
    }

    #[test]
    fn frame_matching_destination_is_copied_exactly() {
        let mut surface = CompositeSurface::new(3, 2, 96).unwrap();
        let frame = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 80, y as u8 * 120, 7, 255]));
        let bounds = surface.bounds();
        surface.draw_frame(&frame, bounds);
        assert_eq!(surface.pixels(), &frame);
    }

    #[test]
    fn fill_rect_is_clipped_to_surface() {
        let mut surface = CompositeSurface::new(10, 10, 96).unwrap();
        surface.fill_rect(Rect::new(5.0, 5.0, 20.0, 20.0), GRAY);
        assert_eq!(*surface.pixels().get_pixel(9, 9), GRAY);
        assert_eq!(*surface.pixels().get_pixel(5, 5), GRAY);
        assert_eq!(*surface.pixels().get_pixel(4, 4), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn translucent_pixel_blends_over_opaque_background() {
        let mut surface = CompositeSurface::new(1, 1, 96).unwrap();
        surface.fill_rect(surface.bounds(), Rgba([0, 0, 0, 255]));
        surface.blend_pixel(0, 0, Rgba([255, 0, 0, 51]));
        assert_eq!(*surface.pixels().get_pixel(0, 0), Rgba([51, 0, 0, 255]));
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut surface = CompositeSurface::new(2, 2, 96).unwrap();
        surface.blend_pixel(-1, 0, GREEN);
        surface.blend_pixel(0, 2, GREEN);
        assert!(surface.pixels().pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn commit_publishes_snapshot() {
        let mut surface = CompositeSurface::new(2, 2, 96).unwrap();
        surface.commit();
        surface.commit();
        assert!(surface.snapshot().is_some());
        assert_eq!(surface.commits(), 2);
    }
}
