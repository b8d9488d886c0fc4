use std::path::PathBuf;

use clap::Parser;

/// webbridge: host a web page in a native window and talk to it over named bridges.
#[derive(Parser, Debug, Default)]
#[command(name = "webbridge", version, about)]
pub struct Args {
    /// Directory holding a production web build (expects index.html).
    #[arg(short = 'c', long)]
    pub content: Option<PathBuf>,

    /// Development HTML file, relative to the content directory.
    #[arg(long)]
    pub dev_html: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. debug, webbridge=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Initial zoom factor.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Check the content directory, print any issues and exit.
    #[arg(long)]
    pub validate: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
