use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::{fmt, EnvFilter};

use imageviewer::app::ImageViewerApp;
use imageviewer::config::{APP_NAME, INITIAL_WINDOW_SIZE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Image viewer with folder slideshows")]
struct Args {
    /// Image to open, or folder to prepare for a slideshow
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "imageviewer={level},wgpu=warn,winit=warn,eframe=warn"
        ))?,
    };
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose).context("failed to set up logging")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size(INITIAL_WINDOW_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let initial = args.path;
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(ImageViewerApp::new(cc, initial)))),
    )
    .map_err(|err| anyhow!("viewer exited with an error: {err}"))?;

    Ok(())
}
