mod config;
mod engine;
mod error;
mod logging;
mod ops;
mod types;
mod ui;

use eframe::egui;
use gstreamer as gst;
use tracing::{error, info};

use crate::config::PlayerConfig;
use crate::error::PlayerError;
use crate::ui::app::PlayerApp;

fn main() -> eframe::Result<()> {
    logging::install_tracing();

    // Without GStreamer the window still opens; every load then fails and
    // is logged.
    if let Err(err) = gst::init() {
        error!(error = %PlayerError::from(err), "media engine unavailable");
    }

    let config = PlayerConfig::default();
    info!(version = env!("CARGO_PKG_VERSION"), "starting player");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size),
        ..Default::default()
    };
    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(PlayerApp::new(cc, &config)))),
    )
}
