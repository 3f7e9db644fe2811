use iced::widget::{center, column, container, image, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::message::Message;
use crate::state::App;

/// Render the main view.
pub fn render_main_view(app: &App) -> Element<'_, Message> {
    let snapshot = app
        .compositor
        .as_ref()
        .and_then(|compositor| compositor.surface().snapshot());

    if let Some(handle) = snapshot {
        let width = app.config.surface_width as f32;
        let height = app.config.surface_height as f32;
        return container(
            image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .content_fit(ContentFit::Fill),
        )
        .center(Length::Fill)
        .into();
    }

    // Nothing composited yet: idle, hovering, or still loading.
    let headline = if app.hovering {
        "Release to Play"
    } else {
        "Drag & Drop a Video Here"
    };

    center(
        column![text(headline).size(36), text(app.status.clone()).size(14)]
            .spacing(20)
            .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
