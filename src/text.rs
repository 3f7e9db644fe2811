//! Shaping and rasterization of overlay labels.

use cosmic_text::{fontdb, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::Rgba;

use crate::config::{OverlayConfig, Point};
use crate::surface::CompositeSurface;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

/// Something that can rasterize a single-line label into the surface.
pub trait TextPainter {
    fn draw(
        &mut self,
        surface: &mut CompositeSurface,
        text: &str,
        origin: Point,
        size: f32,
        color: Rgba<u8>,
    );
}

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    family: Option<String>,
}

impl TextRenderer {
    /// Build a renderer over the system fonts, shaping for the configured locale.
    pub fn new(config: &OverlayConfig) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!(
            "Loaded {} font faces for locale {}",
            db.len(),
            config.locale
        );
        Self::with_database(config, db)
    }

    /// Build a renderer over an explicit font database.
    pub fn with_database(config: &OverlayConfig, db: fontdb::Database) -> Self {
        TextRenderer {
            font_system: FontSystem::new_with_locale_and_db(config.locale.clone(), db),
            swash_cache: SwashCache::new(),
            family: config.font_family.clone(),
        }
    }
}

impl TextPainter for TextRenderer {
    /// Draw `text` with its layout box's top-left corner at `origin`.
    fn draw(
        &mut self,
        surface: &mut CompositeSurface,
        text: &str,
        origin: Point,
        size: f32,
        color: Rgba<u8>,
    ) {
        let metrics = Metrics::new(size, size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(
            &mut self.font_system,
            Some(surface.width() as f32 - origin.x),
            Some(surface.height() as f32 - origin.y),
        );

        let family = match &self.family {
            Some(name) => Family::Name(name.as_str()),
            None => Family::SansSerif,
        };
        buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(family),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let text_color = Color::rgba(color[0], color[1], color[2], color[3]);
        let (ox, oy) = (origin.x.round() as i32, origin.y.round() as i32);
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            text_color,
            |x, y, w, h, glyph| {
                let pixel = Rgba([glyph.r(), glyph.g(), glyph.b(), glyph.a()]);
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        surface.blend_pixel(ox + x + dx, oy + y + dy, pixel);
                    }
                }
            },
        );
    }
}
