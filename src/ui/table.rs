use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{Column, ContactRecord};
use crate::state::{Action, Page};

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Plain text grid with a header row.
pub fn text_table(ui: &mut Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        ui.weak("No rows match the current filters.");
        return;
    }
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(TableColumn::auto().at_least(60.0), headers.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .header(ROW_HEIGHT, |mut header| {
                for title in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Contacts with the given columns. The name cell links to the contact's
/// detail page when the table carries a `full_name` column.
pub fn contact_table(ui: &mut Ui, id: &str, contacts: &[&ContactRecord], columns: &[Column], actions: &mut Vec<Action>) {
    if contacts.is_empty() {
        ui.weak("No contacts match the current filters.");
        return;
    }
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(TableColumn::auto().at_least(60.0), columns.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .header(ROW_HEIGHT, |mut header| {
                for column in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(column.label());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, contacts.len(), |mut row| {
                    let contact = contacts[row.index()];
                    for &column in columns {
                        row.col(|ui: &mut Ui| {
                            let text = contact.display(column);
                            if column == Column::FullName {
                                if ui.link(text).clicked() {
                                    actions.push(Action::SelectContact(contact.contact_id.clone()));
                                    actions.push(Action::SelectPage(Page::ContactDetails));
                                }
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });
}
