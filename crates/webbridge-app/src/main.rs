mod app;
mod cli;
mod demo;
mod settings;

use std::process::ExitCode;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use settings::{log_directive, LaunchSettings};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("webbridge panicked: {info}");
        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    let fallback = "webbridge=info";
    let directive: Result<Directive, _> = directive.parse().or_else(|_| fallback.parse());
    let filter = match directive {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Print the content root report. Exit code reflects validity.
fn validate_content(settings: &LaunchSettings) -> ExitCode {
    let Some(root) = &settings.content_root else {
        eprintln!("No content directory configured (use --content or [content] root)");
        return ExitCode::FAILURE;
    };

    let report = webbridge_webview::validate_content_root(root);
    if report.is_valid() {
        println!("{}: ok ({} files)", root.display(), report.file_count);
        return ExitCode::SUCCESS;
    }
    for issue in &report.issues {
        println!("{}: {issue}", root.display());
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();

    // Load config before logging so its level can seed the filter.
    let config = webbridge_config::load_config(args.config.as_deref());
    init_logging(&log_directive(&args, config.as_ref().ok()));

    tracing::info!("webbridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = config.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        webbridge_config::WebBridgeConfig::default()
    });

    let settings = LaunchSettings::resolve(&args, &config);

    if args.validate {
        return validate_content(&settings);
    }

    if let Some(root) = &settings.content_root {
        let report = webbridge_webview::validate_content_root(root);
        for issue in &report.issues {
            tracing::warn!(root = %root.display(), "{issue}");
        }
    }

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = app::WebBridgeApp::new(settings);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
