//! GStreamer operation logging and timing instrumentation.
//!
//! Position queries run on the UI thread once per tick, so slow ones are
//! worth surfacing.

use std::path::Path;
use std::time::{Duration, Instant};

/// Log categories for filtering
enum LogCategory {
    PositionQuery,
    Lifecycle,
}

impl LogCategory {
    fn as_str(&self) -> &'static str {
        match self {
            LogCategory::PositionQuery => "POSITION_QUERY",
            LogCategory::Lifecycle => "LIFECYCLE",
        }
    }
}

/// Log the completion of a position query with timing
pub fn log_position_query_complete(position: Option<Duration>, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis();

    if elapsed_ms > 16 {
        log::warn!(
            "[{}] position query SLOW: {}ms (longer than a display refresh), position={:?}",
            LogCategory::PositionQuery.as_str(),
            elapsed_ms,
            position
        );
    } else if elapsed_ms > 4 {
        log::debug!(
            "[{}] position query: {}ms, position={:?}",
            LogCategory::PositionQuery.as_str(),
            elapsed_ms,
            position
        );
    } else {
        log::trace!(
            "[{}] position query: {}ms, position={:?}",
            LogCategory::PositionQuery.as_str(),
            elapsed_ms,
            position
        );
    }
}

/// Log player creation
pub fn log_player_created(path: &Path, volume: f64) {
    log::info!(
        "[{}] Player created: path={}, volume={}",
        LogCategory::Lifecycle.as_str(),
        path.display(),
        volume
    );
}

/// Log player shutdown
pub fn log_player_stopped(path: &Path) {
    log::info!(
        "[{}] Player stopped: path={}",
        LogCategory::Lifecycle.as_str(),
        path.display()
    );
}
