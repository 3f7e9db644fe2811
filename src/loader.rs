use std::path::{Path, PathBuf};

use crate::compositor::Compositor;
use crate::error::{LoadError, OverlayError, PlayerError};
use crate::player::PlayerHandle;
use crate::state::App;

/// Handle a dropped file: start playing it and composite over it.
///
/// Failures are reported in a dialog; the window stays usable for the next drop.
pub fn load_video_from_path(app: &mut App, video_path: PathBuf) {
    app.status = "Loading video...".to_string();

    match load(app, &video_path) {
        Ok(()) => {
            if let Some(player) = &app.player {
                app.status = format!("Playing: {}", player.path().display());
            }
        }
        Err(e) => {
            app.status = format!("Failed to load video: {}", e);
            (app.report_error)(&e.to_string());
        }
    }
}

fn load(app: &mut App, video_path: &Path) -> Result<(), LoadError> {
    start_playback(app, video_path)?;
    prepare_overlay(app)?;
    Ok(())
}

/// Replace the current player with one playing `video_path`.
pub fn start_playback(app: &mut App, video_path: &Path) -> Result<(), PlayerError> {
    // Never let two players decode at once.
    if let Some(mut previous) = app.player.take() {
        previous.stop();
    }

    let player = PlayerHandle::open(video_path, app.config.volume, app.config.pixel_size())?;
    player.play()?;
    app.player = Some(player);
    Ok(())
}

/// Allocate a fresh surface and compositor, replacing any previous one.
///
/// The refresh-tick subscription is derived from `app.compositor`, so
/// preparing again swaps the target instead of adding a second subscriber.
pub fn prepare_overlay(app: &mut App) -> Result<(), OverlayError> {
    let compositor = Compositor::new(app.config.clone())?;
    app.compositor = Some(compositor);
    Ok(())
}

/// Poll the player and composite one display refresh.
pub fn composite_tick(app: &mut App) {
    let (Some(player), Some(compositor)) = (app.player.as_mut(), app.compositor.as_mut()) else {
        return;
    };

    player.poll();
    if let Some(message) = player.last_error() {
        app.status = format!("Playback error: {}", message);
    }
    if compositor.on_tick(&*player) {
        log::trace!(
            "Commit #{}: {} layers, {:?} fps",
            compositor.surface().commits(),
            compositor.session().ops().len(),
            compositor.rate()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;

    #[test]
    fn start_playback_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();

        let result = start_playback(&mut app, &dir.path().join("gone.mp4"));

        assert!(matches!(result, Err(PlayerError::NotFound { .. })));
        assert!(app.player.is_none());
    }

    #[test]
    fn prepare_overlay_replaces_compositor() {
        let mut app = App::default();
        prepare_overlay(&mut app).unwrap();
        prepare_overlay(&mut app).unwrap();

        let compositor = app.compositor.as_ref().unwrap();
        assert_eq!(compositor.surface().width(), 800);
        assert_eq!(compositor.surface().height(), 450);
        assert_eq!(compositor.surface().dpi(), 96);
    }

    #[test]
    fn prepare_overlay_fails_for_empty_region() {
        let mut app = App {
            config: OverlayConfig {
                surface_width: 0,
                ..OverlayConfig::default()
            },
            ..App::default()
        };

        assert!(matches!(
            prepare_overlay(&mut app),
            Err(OverlayError::EmptySurface { .. })
        ));
        assert!(app.compositor.is_none());
    }

    #[test]
    fn tick_without_player_is_a_no_op() {
        let mut app = App::default();
        prepare_overlay(&mut app).unwrap();
        composite_tick(&mut app);
        assert!(app.compositor.unwrap().surface().snapshot().is_none());
    }
}
