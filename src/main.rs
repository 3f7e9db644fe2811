mod app;
mod bus_monitor;
mod clock;
mod compositor;
mod config;
mod error;
mod gst_logger;
mod loader;
mod message;
mod player;
mod source;
mod state;
mod surface;
mod text;
mod timecode;
mod ui;

use config::OverlayConfig;
use state::App;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = OverlayConfig::default();
    iced::application(App::default, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .window_size((config.surface_width as f32, config.surface_height as f32))
        .run()
}
