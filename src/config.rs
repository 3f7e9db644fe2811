use image::Rgba;

/// A point in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Placement and color of one overlay text label.
#[derive(Clone, Copy, Debug)]
pub struct LabelStyle {
    pub origin: Point,
    pub color: Rgba<u8>,
}

/// Everything the player and compositor need to know up front.
///
/// Locale and font are explicit here instead of being looked up from the
/// environment at draw time.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub dpi: u32,
    pub volume: f64,
    pub locale: String,
    pub font_family: Option<String>,
    pub font_size: f32,
    pub backing: Rect,
    pub backing_color: Rgba<u8>,
    pub rate_label: LabelStyle,
    pub position_label: LabelStyle,
}

/// Device-independent reference resolution.
pub const BASE_DPI: u32 = 96;

impl OverlayConfig {
    /// Surface size in physical pixels for the configured dpi.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.surface_width * self.dpi / BASE_DPI,
            self.surface_height * self.dpi / BASE_DPI,
        )
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            surface_width: 800,
            surface_height: 450,
            dpi: BASE_DPI,
            volume: 0.2, // 1.0 is full scale
            locale: "en-US".to_string(),
            font_family: None,
            font_size: 20.0,
            backing: Rect::new(20.0, 20.0, 150.0, 60.0),
            backing_color: Rgba([211, 211, 211, 255]), // light gray
            rate_label: LabelStyle {
                origin: Point { x: 30.0, y: 20.0 },
                color: Rgba([255, 0, 0, 255]),
            },
            position_label: LabelStyle {
                origin: Point { x: 30.0, y: 40.0 },
                color: Rgba([0, 0, 255, 255]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pixel_size_matches_logical_size() {
        let config = OverlayConfig::default();
        assert_eq!(config.pixel_size(), (800, 450));
    }

    #[test]
    fn pixel_size_scales_with_dpi() {
        let config = OverlayConfig {
            dpi: 192,
            ..OverlayConfig::default()
        };
        assert_eq!(config.pixel_size(), (1600, 900));
    }
}
