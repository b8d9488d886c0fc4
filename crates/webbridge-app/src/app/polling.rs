//! Widget polling and wake-up scheduling.

use std::time::{Duration, Instant};

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use webbridge_webview::{BridgeEvent, WidgetEvent};

use super::WebBridgeApp;

/// How often engine and bridge events are drained.
pub const POLL_INTERVAL: Duration = Duration::from_millis(16);

impl WebBridgeApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            for event in self.widget.pump() {
                self.handle_widget_event(event);
            }
            self.sync_window_title();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn handle_widget_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::ContentLoaded => {
                let items = self.bridges.data.lock().map(|d| d.len()).unwrap_or(0);
                tracing::info!(url = %self.widget.get_url(), items, "Page loaded");
            }
            WidgetEvent::ContentFailed(reason) => {
                tracing::error!("Page failed to load: {reason}");
            }
            WidgetEvent::BridgeReady => {
                tracing::debug!(bridges = ?self.widget.bridges().names(), "Bridges ready");
            }
            WidgetEvent::Bridge {
                name,
                event: BridgeEvent::ErrorOccurred { message },
            } => {
                tracing::warn!(bridge = %name, "Bridge error: {message}");
            }
            WidgetEvent::Bridge { name, event } => {
                tracing::debug!(bridge = %name, event = event.name(), "Bridge event");
            }
        }
    }

    fn sync_window_title(&mut self) {
        let title = self.widget.title();
        if title.is_empty() || title == self.last_title {
            return;
        }
        self.last_title = title.to_string();
        if let Some(window) = &self.window {
            window.set_title(&self.last_title);
        }
    }
}
