use crate::compositor::Compositor;
use crate::config::OverlayConfig;
use crate::error;
use crate::player::PlayerHandle;

/// Application state: at most one player and one compositor at a time.
pub struct App {
    pub config: OverlayConfig,
    pub player: Option<PlayerHandle>,
    pub compositor: Option<Compositor>,
    pub hovering: bool,
    /// Whether the next `FileDropped` starts a new drop. Only the first file of a batch plays.
    pub accepting_drop: bool,
    pub status: String,
    /// Where load failures are shown to the user.
    pub report_error: fn(&str),
}

impl Default for App {
    fn default() -> Self {
        App {
            config: OverlayConfig::default(),
            player: None,
            compositor: None,
            hovering: false,
            accepting_drop: true,
            status: "Drop a video file here to play it".to_string(),
            report_error: error::show_error_dialog,
        }
    }
}
