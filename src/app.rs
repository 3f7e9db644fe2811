use iced::event::{self, Event};
use iced::{window, Element, Subscription};

use crate::loader;
use crate::message::Message;
use crate::state::App;
use crate::ui;

const TITLE: &str = "Overlayplex";

impl App {
    /// Handle UI messages and state updates.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::FileHovered(path) => {
                log::debug!("File hovered: {}", path.display());
                self.hovering = true;
                self.accepting_drop = true;
            }
            Message::FileHoverLeft => {
                self.hovering = false;
            }
            Message::FileDropped(path) => {
                self.hovering = false;
                if !self.accepting_drop {
                    log::debug!("Ignoring additional dropped file: {}", path.display());
                    return;
                }
                self.accepting_drop = false;
                loader::load_video_from_path(self, path);
            }
            Message::Tick(_) => {
                loader::composite_tick(self);
            }
        }
    }

    /// Subscribe to file drops, and to display refreshes while an overlay is prepared.
    pub fn subscription(&self) -> Subscription<Message> {
        let drops = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(path)) => Some(Message::FileHovered(path)),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.compositor.is_some() {
            Subscription::batch([drops, window::frames().map(Message::Tick)])
        } else {
            drops
        }
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        ui::render_main_view(self)
    }

    pub fn title(&self) -> String {
        if cfg!(debug_assertions) {
            format!("[debug] {}", TITLE)
        } else {
            TITLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_state_follows_drag() {
        let mut app = App::default();
        app.update(Message::FileHovered("clip.mp4".into()));
        assert!(app.hovering);
        app.update(Message::FileHoverLeft);
        assert!(!app.hovering);
    }

    #[test]
    fn only_first_file_of_a_drop_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.mp4");
        let second = dir.path().join("second.mp4");
        let mut app = App {
            report_error: |_| {},
            ..App::default()
        };

        app.update(Message::FileHovered(first.clone()));
        app.update(Message::FileHovered(second.clone()));
        app.update(Message::FileDropped(first));
        let status = app.status.clone();
        assert!(status.contains("first.mp4"));

        app.update(Message::FileDropped(second));
        assert_eq!(app.status, status);
        assert!(!app.accepting_drop);
    }

    #[test]
    fn hovering_again_accepts_the_next_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App {
            report_error: |_| {},
            ..App::default()
        };

        app.update(Message::FileDropped(dir.path().join("a.mp4")));
        app.update(Message::FileHovered(dir.path().join("b.mp4")));
        app.update(Message::FileDropped(dir.path().join("b.mp4")));
        assert!(app.status.contains("b.mp4"));
    }

    #[test]
    fn tick_before_any_drop_does_nothing() {
        let mut app = App::default();
        app.update(Message::Tick(std::time::Instant::now()));
        assert!(app.compositor.is_none());
        assert!(app.player.is_none());
    }

    #[test]
    fn debug_title_is_marked() {
        let app = App::default();
        assert!(app.title().ends_with(TITLE));
        assert_eq!(app.title().starts_with("[debug]"), cfg!(debug_assertions));
    }
}
