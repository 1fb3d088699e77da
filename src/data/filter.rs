use std::collections::BTreeMap;

use super::model::{CellValue, Column, ContactRecord, ContactTable, FieldKind};

// ---------------------------------------------------------------------------
// Categorical filter: which values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column name → accepted values.
/// An empty list, or a name that is not a column, imposes no constraint.
pub type CategoricalFilter = BTreeMap<String, Vec<CellValue>>;

/// Keep rows whose value for every constrained column is accepted.
pub fn filter_table(table: &ContactTable, filters: &CategoricalFilter) -> ContactTable {
    let active: Vec<(Column, &[CellValue])> = filters
        .iter()
        .filter(|(_, accepted)| !accepted.is_empty())
        .filter_map(|(name, accepted)| Column::from_name(name).map(|c| (c, accepted.as_slice())))
        .collect();

    if active.is_empty() {
        return table.clone();
    }

    table.select(|row| {
        active
            .iter()
            .all(|(column, accepted)| accepted.contains(&row.cell(*column)))
    })
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Inclusive bounds on a number column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub column: Column,
    pub min: f64,
    pub max: f64,
}

impl RangeFilter {
    pub fn new(column: Column, min: f64, max: f64) -> Self {
        Self { column, min, max }
    }

    /// A missing value never satisfies a range.
    pub fn matches(&self, row: &ContactRecord) -> bool {
        row.number(self.column)
            .is_some_and(|v| v >= self.min && v <= self.max)
    }
}

pub fn filter_range(table: &ContactTable, column: Column, min: f64, max: f64) -> ContactTable {
    let range = RangeFilter::new(column, min, max);
    table.select(|row| range.matches(row))
}

// ---------------------------------------------------------------------------
// Full-text search
// ---------------------------------------------------------------------------

/// Case-insensitive literal substring search over every text and list column.
/// An empty term returns the input unchanged.
pub fn search_table(table: &ContactTable, term: &str) -> ContactTable {
    if term.is_empty() {
        return table.clone();
    }
    let needle = term.to_lowercase();
    table.select(|row| row_contains(row, &needle))
}

fn row_contains(row: &ContactRecord, needle: &str) -> bool {
    Column::ALL.iter().any(|&column| match column.kind() {
        FieldKind::Text => row
            .text(column)
            .is_some_and(|s| s.to_lowercase().contains(needle)),
        FieldKind::List => row
            .list(column)
            .is_some_and(|items| items.join(", ").to_lowercase().contains(needle)),
        FieldKind::Number | FieldKind::Flag => false,
    })
}

// ---------------------------------------------------------------------------
// Query: the conjunction of all three passes
// ---------------------------------------------------------------------------

/// Everything the user has narrowed the table down with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub ranges: Vec<RangeFilter>,
    pub categorical: CategoricalFilter,
    pub search: String,
}

impl Query {
    /// Apply range, categorical and search passes in that order. The search
    /// term is trimmed, so a whitespace-only term keeps every row.
    pub fn apply(&self, table: &ContactTable) -> ContactTable {
        let ranged = self
            .ranges
            .iter()
            .fold(table.clone(), |t, r| filter_range(&t, r.column, r.min, r.max));
        let filtered = filter_table(&ranged, &self.categorical);
        search_table(&filtered, self.search.trim())
    }

    /// Whether applying the query can remove rows.
    pub fn is_active(&self) -> bool {
        !self.ranges.is_empty()
            || !self.search.trim().is_empty()
            || self.categorical.values().any(|v| !v.is_empty())
    }

    /// Accepted values for one column, empty when unconstrained.
    pub fn accepted(&self, column: Column) -> &[CellValue] {
        self.categorical
            .get(column.name())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Toggle a value in a column's accepted list.
    pub fn toggle(&mut self, column: Column, value: CellValue) {
        let accepted = self.categorical.entry(column.name().to_string()).or_default();
        match accepted.iter().position(|v| *v == value) {
            Some(pos) => {
                accepted.remove(pos);
            }
            None => accepted.push(value),
        }
    }

    /// Replace the bounds on a column, or add them.
    pub fn set_range(&mut self, range: RangeFilter) {
        self.ranges.retain(|r| r.column != range.column);
        self.ranges.push(range);
    }

    pub fn range(&self, column: Column) -> Option<&RangeFilter> {
        self.ranges.iter().find(|r| r.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::contact;
    use pretty_assertions::assert_eq;

    fn sample() -> ContactTable {
        let mut acme = contact("1", "CTO");
        acme.company = "ACME Corp".into();
        acme.lead_score = Some(4.0);
        acme.overall_sentiment = "Positive".into();

        let mut globex = contact("2", "CFO");
        globex.company = "Globex".into();
        globex.lead_score = Some(2.0);
        globex.pain_points = vec!["legacy acme integration".into()];
        globex.overall_sentiment = "Negative".into();

        let mut initech = contact("3", "CTO");
        initech.company = "Initech".into();
        initech.lead_score = None;
        initech.overall_sentiment = "Positive".into();

        ContactTable::from_records(vec![acme, globex, initech])
    }

    fn ids(table: &ContactTable) -> Vec<&str> {
        table.iter().map(|r| r.contact_id.as_str()).collect()
    }

    #[test]
    fn empty_list_is_no_constraint() {
        let table = sample();
        let mut filters = CategoricalFilter::new();
        filters.insert("role".into(), vec![]);
        assert_eq!(filter_table(&table, &filters), table);
        assert_eq!(filter_table(&table, &filters), filter_table(&table, &CategoricalFilter::new()));
    }

    #[test]
    fn membership_filter_keeps_matching_rows() {
        let table = sample();
        let mut filters = CategoricalFilter::new();
        filters.insert("role".into(), vec!["CTO".into()]);
        assert_eq!(ids(&filter_table(&table, &filters)), vec!["1", "3"]);

        filters.insert("overall_sentiment".into(), vec!["Negative".into(), "Positive".into()]);
        filters.insert("no_such_column".into(), vec!["x".into()]);
        assert_eq!(ids(&filter_table(&table, &filters)), vec!["1", "3"]);
    }

    #[test]
    fn range_is_inclusive_and_skips_missing() {
        let table = sample();
        assert_eq!(ids(&filter_range(&table, Column::LeadScore, 2.0, 4.0)), vec!["1", "2"]);
        assert_eq!(ids(&filter_range(&table, Column::LeadScore, 4.0, 4.0)), vec!["1"]);
        assert!(filter_range(&table, Column::LeadScore, 4.5, 5.0).is_empty());
    }

    #[test]
    fn empty_search_is_identity() {
        let table = sample();
        assert_eq!(search_table(&table, ""), table);
    }

    #[test]
    fn search_is_case_insensitive_across_text_and_lists() {
        let table = sample();
        let upper = search_table(&table, "ACME");
        let lower = search_table(&table, "acme");
        assert_eq!(upper, lower);
        assert_eq!(ids(&lower), vec!["1", "2"]);
    }

    #[test]
    fn search_is_literal_not_a_pattern() {
        let mut record = contact("x", "Dev");
        record.raw_challenge = "needs c++ tooling".into();
        let table = ContactTable::from_records(vec![record, contact("y", "Dev")]);
        assert_eq!(ids(&search_table(&table, "C++")), vec!["x"]);
        assert!(search_table(&table, "c.+").is_empty());
    }

    #[test]
    fn search_ignores_numbers() {
        let table = sample();
        assert!(search_table(&table, "4").is_empty());
    }

    #[test]
    fn query_composes_by_conjunction() {
        let table = sample();
        let mut query = Query::default();
        assert!(!query.is_active());
        assert_eq!(query.apply(&table), table);

        query.set_range(RangeFilter::new(Column::LeadScore, 0.0, 5.0));
        query.toggle(Column::Role, "CTO".into());
        assert_eq!(ids(&query.apply(&table)), vec!["1"]);

        query.search = "globex".into();
        assert!(query.apply(&table).is_empty());
        assert!(query.is_active());
    }

    #[test]
    fn whitespace_only_search_keeps_every_row() {
        let table = sample();
        let query = Query { search: "   ".into(), ..Query::default() };
        assert!(!query.is_active());
        assert_eq!(query.apply(&table), table);

        let padded = Query { search: "  globex ".into(), ..Query::default() };
        assert_eq!(ids(&padded.apply(&table)), vec!["2"]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut query = Query::default();
        query.toggle(Column::Role, "CTO".into());
        assert_eq!(query.accepted(Column::Role), &[CellValue::from("CTO")]);
        query.toggle(Column::Role, "CTO".into());
        assert!(query.accepted(Column::Role).is_empty());
        assert!(!query.is_active());
    }

    #[test]
    fn set_range_replaces_existing_bounds() {
        let mut query = Query::default();
        query.set_range(RangeFilter::new(Column::LeadScore, 0.0, 5.0));
        query.set_range(RangeFilter::new(Column::LeadScore, 3.0, 5.0));
        assert_eq!(query.ranges.len(), 1);
        assert_eq!(query.range(Column::LeadScore).map(|r| r.min), Some(3.0));
    }
}
