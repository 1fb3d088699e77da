//! egui rendering. Nothing in here mutates [`crate::state::AppState`]; widgets
//! push [`crate::state::Action`]s instead.

pub mod pages;
pub mod panels;
pub mod plot;
pub mod table;
