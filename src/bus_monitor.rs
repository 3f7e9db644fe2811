//! GStreamer bus polling for the active player.
//!
//! The bus is drained without blocking once per tick; the resulting events
//! drive the player's readiness.

use gstreamer::prelude::*;

/// Bus messages the player cares about.
#[derive(Clone, Debug, PartialEq)]
pub enum BusEvent {
    Buffering(i32),
    AsyncDone,
    Error(String),
}

/// Pop every message currently queued on the pipeline's bus.
pub fn poll_bus(pipeline: &gstreamer::Element) -> Vec<BusEvent> {
    let mut events = Vec::new();
    let Some(bus) = pipeline.bus() else {
        return events;
    };

    // Non-blocking check for messages (timeout = 0)
    while let Some(msg) = bus.timed_pop(gstreamer::ClockTime::ZERO) {
        use gstreamer::MessageView;

        match msg.view() {
            MessageView::Buffering(buffering) => {
                log::trace!("Bus monitor: buffering {}%", buffering.percent());
                events.push(BusEvent::Buffering(buffering.percent()));
            }
            MessageView::AsyncDone(_) => {
                log::info!("Bus monitor: ASYNC_DONE received");
                events.push(BusEvent::AsyncDone);
            }
            MessageView::Error(err) => {
                log::error!(
                    "GStreamer error: {} (debug: {:?})",
                    err.error(),
                    err.debug()
                );
                events.push(BusEvent::Error(err.error().to_string()));
            }
            MessageView::Warning(warn) => {
                log::warn!(
                    "GStreamer warning: {} (debug: {:?})",
                    warn.error(),
                    warn.debug()
                );
            }
            MessageView::Eos(_) => {
                log::debug!("GStreamer EOS");
            }
            _ => {}
        }
    }

    events
}

/// How much of the media is available, as reported by the bus.
#[derive(Debug, Default)]
pub struct Readiness {
    progress: f64,
    buffering_seen: bool,
    last_error: Option<String>,
}

impl Readiness {
    pub fn apply(&mut self, event: BusEvent) {
        match event {
            BusEvent::Buffering(percent) => {
                self.buffering_seen = true;
                self.progress = (percent.clamp(0, 100) as f64) / 100.0;
            }
            // Local files never report buffering; prerolling means fully available.
            BusEvent::AsyncDone if !self.buffering_seen => self.progress = 1.0,
            BusEvent::AsyncDone => {}
            BusEvent::Error(message) => self.last_error = Some(message),
        }
    }

    /// Download progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
