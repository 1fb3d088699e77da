//! Derived figures over a loaded (or filtered) table.
//!
//! Every function here is pure: it reads a `ContactTable` and returns a fresh
//! value, so the UI can recompute everything after each interaction.

pub mod correlation;
pub mod counts;
pub mod groups;
pub mod keywords;
pub mod metrics;
