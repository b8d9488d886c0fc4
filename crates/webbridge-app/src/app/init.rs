//! Window creation and webview setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use webbridge_webview::WryEngine;

use super::bounds::window_rect;
use super::WebBridgeApp;

impl WebBridgeApp {
    /// Create the window, build the webview inside it and start loading.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("webbridge")
            .with_transparent(self.settings.webview.transparent)
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 720.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let engine = match WryEngine::build(
            window.as_ref(),
            window_rect(&window),
            &self.settings.webview,
        ) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                return false;
            }
        };

        self.widget.attach_engine(Box::new(engine));
        self.window = Some(window);
        self.widget.load();
        true
    }
}
