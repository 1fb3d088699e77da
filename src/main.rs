mod analytics;
mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use serde::Serialize;

use analytics::counts::Frequencies;
use analytics::keywords::extract_keywords;
use analytics::metrics::{aggregate_metrics, AggregateMetrics};
use app::ContactDashboardApp;
use config::Cli;
use data::loader::load_file;
use data::model::Column;
use state::{Action, AppState};

#[derive(Serialize)]
struct Summary {
    metrics: AggregateMetrics,
    challenge_keywords: Frequencies,
    pain_points: Frequencies,
}

fn print_summary(cli: &Cli) -> Result<()> {
    let table = load_file(&cli.data).with_context(|| format!("loading {}", cli.data.display()))?;
    let summary = Summary {
        metrics: aggregate_metrics(&table),
        challenge_keywords: extract_keywords(&table, Column::ChallengeKeywords),
        pain_points: extract_keywords(&table, Column::PainPoints),
    };
    let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.summary {
        return print_summary(&cli);
    }

    let mut state = AppState::default();
    if cli.data.exists() {
        state = state.handle(Action::LoadFile(cli.data.clone()));
    } else {
        log::info!("{} not found, starting without data", cli.data.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Contact Analytics Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(ContactDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
