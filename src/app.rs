use eframe::egui;

use crate::state::{Action, AppState};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Widgets only read the state and queue [`Action`]s; the queue is applied
/// once per frame after drawing.
#[derive(Default)]
pub struct ContactDashboardApp {
    pub state: AppState,
}

impl ContactDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

/// Files dropped onto the window since the last frame.
fn dropped_files(ctx: &egui::Context) -> Vec<Action> {
    ctx.input(|i| i.raw.dropped_files.clone())
        .into_iter()
        .filter_map(|file| match (file.path, file.bytes) {
            (Some(path), _) => Some(Action::LoadFile(path)),
            (None, Some(bytes)) => Some(Action::LoadBytes {
                name: file.name,
                bytes: bytes.to_vec(),
            }),
            (None, None) => None,
        })
        .collect()
}

impl eframe::App for ContactDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut actions);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut actions);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            pages::show(ui, &self.state, &mut actions);
        });

        for action in actions {
            self.state = std::mem::take(&mut self.state).handle(action);
        }
    }
}
