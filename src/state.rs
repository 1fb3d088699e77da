use std::path::PathBuf;

use crate::analytics::counts::Frequencies;
use crate::analytics::keywords::extract_keywords;
use crate::analytics::metrics::{aggregate_metrics, AggregateMetrics};
use crate::data::export::export_csv;
use crate::data::filter::{Query, RangeFilter};
use crate::data::loader::{load_bytes, load_file, DataLoadError};
use crate::data::model::{CellValue, Column, ContactRecord, ContactTable};

/// Columns offered as multi-select filters, in panel order.
pub const FILTER_COLUMNS: [Column; 10] = [
    Column::OverallSentiment,
    Column::Role,
    Column::ChallengeCategory,
    Column::IndustryVertical,
    Column::SentimentProgression,
    Column::SeverityLevel,
    Column::EstimatedTimeline,
    Column::DecisionMakerStatus,
    Column::CompanySizeIndicator,
    Column::TechAdoptionLevel,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    ContactDetails,
    Sentiment,
    Challenges,
    Sales,
    Industry,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::ContactDetails,
        Page::Sentiment,
        Page::Challenges,
        Page::Sales,
        Page::Industry,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::ContactDetails => "Contact Details",
            Page::Sentiment => "Sentiment Analysis",
            Page::Challenges => "Challenge Analysis",
            Page::Sales => "Sales Qualification",
            Page::Industry => "Industry Insights",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived view of the filtered table
// ---------------------------------------------------------------------------

/// Everything computed from the filtered rows; rebuilt after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub table: ContactTable,
    pub metrics: AggregateMetrics,
    pub challenge_keywords: Frequencies,
    pub pain_points: Frequencies,
}

impl View {
    pub fn of(table: ContactTable) -> Self {
        Self {
            metrics: aggregate_metrics(&table),
            challenge_keywords: extract_keywords(&table, Column::ChallengeKeywords),
            pain_points: extract_keywords(&table, Column::PainPoints),
            table,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// User input, applied with [`AppState::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadFile(PathBuf),
    /// An uploaded (dropped) document.
    LoadBytes { name: String, bytes: Vec<u8> },
    SetSearch(String),
    ToggleFilter { column: Column, value: CellValue },
    ClearFilter(Column),
    SetRange(RangeFilter),
    ClearRange(Column),
    ResetFilters,
    SelectPage(Page),
    SelectContact(String),
    ExportCsv(PathBuf),
    DismissStatus,
}

/// The full UI state, independent of rendering.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Loaded table; never mutated after a load, only filtered into `view`.
    pub data: ContactTable,

    /// Where `data` came from, for the top bar.
    pub source: Option<String>,

    pub query: Query,

    /// Filtered rows and their aggregates (cached).
    pub view: View,

    pub page: Page,

    /// Drill-down target on the contact page.
    pub selected_contact: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Apply one interaction and return the next state.
    pub fn handle(mut self, action: Action) -> Self {
        match action {
            Action::LoadFile(path) => {
                let source = path.display().to_string();
                match load_file(&path) {
                    Ok(table) => self.set_table(table, source),
                    Err(e) => self.load_failed(&source, e),
                }
            }
            Action::LoadBytes { name, bytes } => match load_bytes(&bytes) {
                Ok(table) => self.set_table(table, name),
                Err(e) => self.load_failed(&name, e),
            },
            Action::SetSearch(term) => {
                self.query.search = term;
                self.refilter();
            }
            Action::ToggleFilter { column, value } => {
                self.query.toggle(column, value);
                self.refilter();
            }
            Action::ClearFilter(column) => {
                self.query.categorical.remove(column.name());
                self.refilter();
            }
            Action::SetRange(range) => {
                self.query.set_range(range);
                self.refilter();
            }
            Action::ClearRange(column) => {
                self.query.ranges.retain(|r| r.column != column);
                self.refilter();
            }
            Action::ResetFilters => {
                self.query = Query::default();
                self.refilter();
            }
            Action::SelectPage(page) => self.page = page,
            Action::SelectContact(id) => self.selected_contact = Some(id),
            Action::ExportCsv(path) => match export_csv(&self.view.table, &path) {
                Ok(()) => {
                    self.status_message = Some(format!(
                        "Exported {} contacts to {}",
                        self.view.table.len(),
                        path.display()
                    ));
                }
                Err(e) => {
                    log::error!("Failed to export: {e:#}");
                    self.status_message = Some(format!("Export failed: {e:#}"));
                }
            },
            Action::DismissStatus => self.status_message = None,
        }
        self
    }

    /// Ingest a newly loaded table; filters start out cleared.
    fn set_table(&mut self, table: ContactTable, source: String) {
        log::debug!("showing {} contacts from {source}", table.len());
        self.data = table;
        self.source = Some(source);
        self.query = Query::default();
        self.selected_contact = None;
        self.status_message = None;
        self.refilter();
    }

    /// A failed load leaves an empty table and a message offering another try.
    fn load_failed(&mut self, source: &str, err: DataLoadError) {
        log::error!("Failed to load {source}: {err}");
        self.data = ContactTable::default();
        self.source = None;
        self.query = Query::default();
        self.selected_contact = None;
        self.refilter();
        self.status_message = Some(format!("Error loading data: {err}. Open or drop another file."));
    }

    /// Recompute the view after a query change.
    fn refilter(&mut self) {
        self.view = View::of(self.query.apply(&self.data));
    }

    /// The contact shown on the detail page: the selection if it survived
    /// filtering, otherwise the first visible row.
    pub fn selected_record(&self) -> Option<&ContactRecord> {
        self.selected_contact
            .as_deref()
            .and_then(|id| self.view.table.get(id))
            .or_else(|| self.view.table.rows().first())
    }

    /// Filter options for a column, taken from the unfiltered table.
    pub fn filter_options(&self, column: Column) -> Vec<CellValue> {
        self.data.unique_values(column).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::contact;
    use pretty_assertions::assert_eq;

    fn loaded() -> AppState {
        let mut cto = contact("1", "CTO");
        cto.lead_score = Some(4.0);
        cto.challenge_keywords = vec!["cost".into()];
        let mut cfo = contact("2", "CFO");
        cfo.lead_score = Some(1.0);
        let mut state = AppState::default();
        state.set_table(ContactTable::from_records(vec![cto, cfo]), "test".to_string());
        state
    }

    #[test]
    fn loading_populates_view() {
        let state = loaded();
        assert_eq!(state.view.table.len(), 2);
        assert_eq!(state.view.metrics.total_contacts, 2);
        assert_eq!(state.view.challenge_keywords.get("cost"), Some(1));
        assert_eq!(state.source.as_deref(), Some("test"));
    }

    #[test]
    fn filters_narrow_view_but_not_data() {
        let state = loaded().handle(Action::ToggleFilter {
            column: Column::Role,
            value: "CFO".into(),
        });
        assert_eq!(state.data.len(), 2);
        assert_eq!(state.view.table.len(), 1);
        assert_eq!(state.view.metrics.avg_lead_score, Some(1.0));
        assert!(state.view.challenge_keywords.is_empty());

        let state = state.handle(Action::ClearFilter(Column::Role));
        assert_eq!(state.view.table.len(), 2);
    }

    #[test]
    fn range_and_search_compose() {
        let state = loaded()
            .handle(Action::SetRange(RangeFilter::new(Column::LeadScore, 3.0, 5.0)))
            .handle(Action::SetSearch("cfo".into()));
        assert!(state.view.table.is_empty());
        assert_eq!(state.view.metrics, AggregateMetrics::empty());

        let state = state.handle(Action::ClearRange(Column::LeadScore));
        assert_eq!(state.view.table.len(), 1);

        let state = state.handle(Action::ResetFilters);
        assert_eq!(state.view.table.len(), 2);
    }

    #[test]
    fn failed_load_falls_back_to_empty_table() {
        let state = loaded().handle(Action::LoadBytes {
            name: "upload.json".into(),
            bytes: b"not json".to_vec(),
        });
        assert!(state.data.is_empty());
        assert!(state.view.table.is_empty());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error loading data")));

        let state = state.handle(Action::DismissStatus);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn upload_replaces_data_and_clears_query() {
        let bytes = br#"[{"message":{"content":{"contact_analytics":{"contact_id":"u1"}}}}]"#.to_vec();
        let state = loaded()
            .handle(Action::SetSearch("zzz".into()))
            .handle(Action::LoadBytes { name: "upload.json".into(), bytes });
        assert_eq!(state.query, Query::default());
        assert_eq!(state.view.table.rows()[0].contact_id, "u1");
    }

    #[test]
    fn selection_falls_back_to_first_visible_row() {
        let state = loaded().handle(Action::SelectContact("2".into()));
        assert_eq!(state.selected_record().map(|r| r.contact_id.as_str()), Some("2"));

        let state = state.handle(Action::SetSearch("cto".into()));
        assert_eq!(state.selected_record().map(|r| r.contact_id.as_str()), Some("1"));
    }

    #[test]
    fn contacts_without_ids_can_each_be_drilled_into() {
        let bytes = br#"[
            {"message":{"content":{"contact_analytics":{"basic_info":{"full_name":"Ann"}}}}},
            {"message":{"content":{"contact_analytics":{"basic_info":{"full_name":"Bob"}}}}}
        ]"#
        .to_vec();
        let state = AppState::default().handle(Action::LoadBytes { name: "upload.json".into(), bytes });
        let ids: Vec<String> = state.view.table.iter().map(|r| r.contact_id.clone()).collect();
        assert_eq!(ids, vec!["#0", "#1"]);

        let state = state.handle(Action::SelectContact(ids[1].clone()));
        assert_eq!(state.selected_record().map(|r| r.full_name.as_str()), Some("Bob"));
        let radar = crate::charts::dashboard::contact_radar(&state.view.table, &ids[1]);
        assert_eq!(radar.map(|r| r.title), Some("Contact Performance: Bob".to_string()));
    }

    #[test]
    fn export_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let state = loaded()
            .handle(Action::SetSearch("cto".into()))
            .handle(Action::ExportCsv(path.clone()));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(state.status_message.is_some_and(|m| m.starts_with("Exported 1")));
    }
}
