use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::RangeFilter;
use crate::data::model::Column;
use crate::state::{Action, AppState, Page, FILTER_COLUMNS};

/// Number columns with a range slider, and their full scale.
const RANGE_COLUMNS: [(Column, f64, f64); 2] = [
    (Column::LeadScore, 0.0, 5.0),
    (Column::EnthusiasmLevel, 0.0, 10.0),
];

// ---------------------------------------------------------------------------
// Left side panel – search, ranges, multi-select filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    ui.heading("Filters");
    ui.separator();

    if state.data.is_empty() {
        ui.label("No data loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Free-text search ----
            ui.strong("Search contacts");
            let mut term = state.query.search.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut term)
                    .hint_text("name, company, keyword…")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                actions.push(Action::SetSearch(term));
            }
            ui.separator();

            for (column, lo, hi) in RANGE_COLUMNS {
                range_sliders(ui, state, column, lo, hi, actions);
            }
            ui.separator();

            // ---- Per-column filter widgets (collapsible) ----
            for column in FILTER_COLUMNS {
                multi_select(ui, state, column, actions);
            }

            ui.add_space(8.0);
            if ui
                .add_enabled(state.query.is_active(), egui::Button::new("Reset all filters"))
                .clicked()
            {
                actions.push(Action::ResetFilters);
            }
        });
}

/// Two sliders bounding a number column. The range only takes effect once
/// one of them is moved.
fn range_sliders(ui: &mut Ui, state: &AppState, column: Column, lo: f64, hi: f64, actions: &mut Vec<Action>) {
    let current = state.query.range(column).copied();
    let (mut min, mut max) = current.map_or((lo, hi), |r| (r.min, r.max));

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(column.label());
        if current.is_some() && ui.small_button("Clear").clicked() {
            actions.push(Action::ClearRange(column));
        }
    });
    let min_changed = ui
        .add(egui::Slider::new(&mut min, lo..=hi).step_by(0.5).text("min"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(&mut max, lo..=hi).step_by(0.5).text("max"))
        .changed();
    if min_changed || max_changed {
        if min > max {
            if min_changed {
                max = min;
            } else {
                min = max;
            }
        }
        actions.push(Action::SetRange(RangeFilter::new(column, min, max)));
    }
}

fn multi_select(ui: &mut Ui, state: &AppState, column: Column, actions: &mut Vec<Action>) {
    let options = state.filter_options(column);
    let accepted = state.query.accepted(column);

    // Show count of selected / total in the header
    let header_text = format!("{}  ({}/{})", column.label(), accepted.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.name())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if !accepted.is_empty() && ui.small_button("Any").clicked() {
                actions.push(Action::ClearFilter(column));
            }
            for value in options {
                let mut checked = accepted.contains(&value);
                let label = match value.to_string() {
                    s if s.is_empty() => "(empty)".to_string(),
                    s => s,
                };
                if ui.checkbox(&mut checked, label).changed() {
                    actions.push(Action::ToggleFilter { column, value });
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = open_file_dialog() {
                    actions.push(Action::LoadFile(path));
                }
                ui.close_menu();
            }
            let can_export = !state.view.table.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                if let Some(path) = save_csv_dialog() {
                    actions.push(Action::ExportCsv(path));
                }
                ui.close_menu();
            }
        });

        ui.separator();

        for page in Page::ALL {
            if ui.selectable_label(state.page == page, page.title()).clicked() {
                actions.push(Action::SelectPage(page));
            }
        }

        ui.separator();

        if let Some(source) = &state.source {
            ui.label(format!(
                "{source}: {} contacts, {} visible",
                state.data.len(),
                state.view.table.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Exported") {
                Color32::DARK_GREEN
            } else {
                Color32::RED
            };
            ui.label(RichText::new(msg).color(color));
            if ui.small_button("✕").clicked() {
                actions.push(Action::DismissStatus);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_file_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open contact analytics")
        .add_filter("JSON", &["json"])
        .pick_file()
}

fn save_csv_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export filtered contacts")
        .add_filter("CSV", &["csv"])
        .set_file_name("contacts.csv")
        .save_file()
}
