mod app;
mod compare;
mod config;
mod error;
mod utils;

use anyhow::Context;
use app::{FileComparator, UploadController};
use clap::Parser;
use compare::HttpComparisonService;
use config::{load_settings, Cli};
use eframe::CreationContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    tracing::info!(endpoint = %settings.compare_endpoint(), "comparison service configured");

    let service = Arc::new(HttpComparisonService::new(&settings));
    let controller =
        UploadController::new(service).context("failed to start the async runtime")?;
    let server_url = settings.server_url.clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 520.0])
            .with_min_inner_size([420.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Comparador de Arquivos",
        options,
        Box::new(move |cc: &CreationContext| -> Box<dyn eframe::App> {
            Box::new(FileComparator::new(cc, controller, server_url))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to open window: {e}"))
}
