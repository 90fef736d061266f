mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::{ControlPanelApp, PersistedPanelSettings, SETTINGS_STORAGE_KEY};

/// Desktop control panel for the HTML text indexer.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the indexer web application; overrides the persisted value.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HTML Text Indexer")
            .with_inner_size([880.0, 720.0])
            .with_min_inner_size([700.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "HTML Text Indexer",
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedPanelSettings>(&text).ok())
            });
            Ok(Box::new(ControlPanelApp::new(
                cmd_tx,
                ui_rx,
                args.server_url,
                persisted,
            )))
        }),
    )
}
