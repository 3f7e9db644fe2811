use std::time::Duration;

/// Format a playback position as `mm:ss.ff`.
///
/// Minutes wrap at the hour and hundredths are truncated, so 1h 2m 3.456s
/// reads `02:03.45`.
pub fn format_position(position: Duration) -> String {
    let total_ms = position.as_millis();
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1_000) % 60;
    let hundredths = (total_ms % 1_000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, hundredths)
}
