use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::ResourceKind;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{ArchiveApp, StartupConfig};

/// Desktop browser for the galaxy archive's people, planets, and
/// starships collections.
#[derive(Debug, Parser)]
#[command(name = "galaxy-archive")]
struct Args {
    /// Base URL of the archive API; overrides GALAXY_ARCHIVE_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// View to open at startup: people, planets, or starships.
    #[arg(long, value_parser = parse_view)]
    view: Option<ResourceKind>,
}

fn parse_view(raw: &str) -> Result<ResourceKind, String> {
    ResourceKind::from_route_segment(raw)
        .ok_or_else(|| format!("unknown view '{raw}' (expected people, planets, or starships)"))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let startup = match StartupConfig::resolve(args.api_url.as_deref(), args.view) {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(2);
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(startup.api_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Galaxy Archive Browser")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Galaxy Archive Browser",
        options,
        Box::new(move |_cc| Ok(Box::new(ArchiveApp::new(cmd_tx, ui_rx, &startup)))),
    )
}
