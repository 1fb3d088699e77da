//! Per-group breakdowns used by the analysis pages.

use std::collections::BTreeMap;

use super::counts::FrequencyCounter;
use super::metrics::mean;
use crate::data::model::{Column, ContactRecord, ContactTable};

/// Mean of a number column per distinct value of a text column, highest first.
/// Groups without any valid value sort last with `None`.
pub fn mean_by_group(table: &ContactTable, group: Column, value: Column) -> Vec<(String, Option<f64>)> {
    mean_by_group_with(table, group, |row| row.number(value))
}

/// [`mean_by_group`] over a derived per-row value.
pub fn mean_by_group_with<F>(table: &ContactTable, group: Column, value: F) -> Vec<(String, Option<f64>)>
where
    F: Fn(&ContactRecord) -> Option<f64>,
{
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in table {
        let key = row.text(group).unwrap_or_default();
        let values = groups.entry(key).or_default();
        if let Some(v) = value(row) {
            values.push(v);
        }
    }

    let mut out: Vec<(String, Option<f64>)> = groups
        .into_iter()
        .map(|(key, values)| (key.to_string(), mean(values)))
        .collect();
    out.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    out
}

/// Most common non-empty value of `value` per group, smallest value on ties.
pub fn mode_by_group(table: &ContactTable, group: Column, value: Column) -> Vec<(String, Option<String>)> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for row in table {
        let key = row.text(group).unwrap_or_default();
        let values = groups.entry(key).or_default();
        if let Some(v) = row.text(value).filter(|v| !v.is_empty()) {
            values.push(v);
        }
    }

    groups
        .into_iter()
        .map(|(key, values)| (key.to_string(), mode(values)))
        .collect()
}

/// Most common value, or `None` for an empty input.
pub fn mode<'a, I: IntoIterator<Item = &'a str>>(values: I) -> Option<String> {
    let mut sorted: Vec<&str> = values.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .into_iter()
        .collect::<FrequencyCounter>()
        .most_common(Some(1))
        .into_vec()
        .into_iter()
        .next()
        .map(|(value, _)| value)
}

/// Counts of (row value, column value) pairs of two text columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crosstab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `counts[r][c]` for `rows[r]` × `columns[c]`.
    pub counts: Vec<Vec<usize>>,
}

impl Crosstab {
    pub fn get(&self, row: &str, column: &str) -> usize {
        let r = self.rows.iter().position(|v| v == row);
        let c = self.columns.iter().position(|v| v == column);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }
}

pub fn crosstab(table: &ContactTable, rows: Column, columns: Column) -> Crosstab {
    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for row in table {
        let key = (row.text(rows).unwrap_or_default(), row.text(columns).unwrap_or_default());
        *pairs.entry(key).or_default() += 1;
    }

    let mut row_keys: Vec<String> = pairs.keys().map(|(r, _)| r.to_string()).collect();
    row_keys.dedup();
    let mut col_keys: Vec<String> = pairs.keys().map(|(_, c)| c.to_string()).collect();
    col_keys.sort();
    col_keys.dedup();

    let mut counts = vec![vec![0; col_keys.len()]; row_keys.len()];
    for ((r, c), n) in pairs {
        let ri = row_keys.iter().position(|k| k == r).unwrap_or_default();
        let ci = col_keys.iter().position(|k| k == c).unwrap_or_default();
        counts[ri][ci] = n;
    }

    Crosstab {
        rows: row_keys,
        columns: col_keys,
        counts,
    }
}

/// Contacts per lead-score tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadBuckets {
    /// 4 and above.
    pub high: usize,
    /// At least 2, below 4.
    pub medium: usize,
    /// Below 2.
    pub low: usize,
}

pub fn lead_score_buckets(table: &ContactTable) -> LeadBuckets {
    table
        .numbers(Column::LeadScore)
        .fold(LeadBuckets::default(), |mut b, score| {
            if score >= 4.0 {
                b.high += 1;
            } else if score >= 2.0 {
                b.medium += 1;
            } else {
                b.low += 1;
            }
            b
        })
}

/// The `n` rows with the largest value of a number column. Missing values sort
/// last; equal values keep table order.
pub fn top_by(table: &ContactTable, column: Column, n: usize) -> Vec<&ContactRecord> {
    let mut rows: Vec<&ContactRecord> = table.iter().collect();
    rows.sort_by(|a, b| match (a.number(column), b.number(column)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Category orderings
// ---------------------------------------------------------------------------

pub const SEVERITY_ORDER: [&str; 4] = ["Critical", "High", "Medium", "Low"];

pub const TECH_ADOPTION_ORDER: [&str; 7] = [
    "Innovator",
    "Early Adopter",
    "Early Majority",
    "Mainstream",
    "Late Majority",
    "Laggard",
    "Unknown",
];

/// Days-ish sort key of an estimated timeline; `None` for unrecognised text.
pub fn timeline_rank(timeline: &str) -> Option<u32> {
    match timeline {
        "30 days" => Some(30),
        "60 days" => Some(60),
        "90 days" => Some(90),
        "90+ days" => Some(100),
        "120 days" => Some(120),
        "180 days" => Some(180),
        "Unknown" => Some(999),
        _ => None,
    }
}

/// Numeric position of a sentiment label on a negative → positive axis.
pub fn sentiment_score(sentiment: &str) -> Option<f64> {
    match sentiment {
        "Positive" => Some(3.0),
        "Neutral" => Some(2.0),
        "Mixed" => Some(1.5),
        "Negative" => Some(1.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::contact;
    use pretty_assertions::assert_eq;

    fn scored(id: &str, role: &str, lead: Option<f64>, sentiment: &str) -> ContactRecord {
        let mut r = contact(id, role);
        r.lead_score = lead;
        r.overall_sentiment = sentiment.to_string();
        r
    }

    fn sample() -> ContactTable {
        ContactTable::from_records(vec![
            scored("1", "CTO", Some(4.0), "Positive"),
            scored("2", "CTO", Some(2.0), "Positive"),
            scored("3", "CFO", Some(5.0), "Negative"),
            scored("4", "Intern", None, ""),
            scored("5", "CTO", Some(1.0), "Neutral"),
        ])
    }

    #[test]
    fn group_means_sorted_descending_with_missing_last() {
        let means = mean_by_group(&sample(), Column::Role, Column::LeadScore);
        assert_eq!(
            means,
            vec![
                ("CFO".to_string(), Some(5.0)),
                ("CTO".to_string(), Some(7.0 / 3.0)),
                ("Intern".to_string(), None),
            ]
        );
    }

    #[test]
    fn derived_group_means_use_sentiment_scores() {
        let means = mean_by_group_with(&sample(), Column::Role, |row| sentiment_score(&row.overall_sentiment));
        assert_eq!(
            means,
            vec![
                ("CTO".to_string(), Some(8.0 / 3.0)),
                ("CFO".to_string(), Some(1.0)),
                ("Intern".to_string(), None),
            ]
        );
    }

    #[test]
    fn mode_per_group_is_optional() {
        let modes = mode_by_group(&sample(), Column::Role, Column::OverallSentiment);
        assert_eq!(
            modes,
            vec![
                ("CFO".to_string(), Some("Negative".to_string())),
                ("CTO".to_string(), Some("Positive".to_string())),
                ("Intern".to_string(), None),
            ]
        );
    }

    #[test]
    fn mode_ties_pick_smallest_value() {
        assert_eq!(mode(["b", "a"]), Some("a".to_string()));
        assert_eq!(mode(std::iter::empty()), None);
    }

    #[test]
    fn crosstab_counts_pairs() {
        let tab = crosstab(&sample(), Column::Role, Column::OverallSentiment);
        assert_eq!(tab.rows, vec!["CFO", "CTO", "Intern"]);
        assert_eq!(tab.columns, vec!["", "Negative", "Neutral", "Positive"]);
        assert_eq!(tab.get("CTO", "Positive"), 2);
        assert_eq!(tab.get("CTO", "Negative"), 0);
        assert_eq!(tab.get("Nobody", "Positive"), 0);
    }

    #[test]
    fn buckets_skip_missing_scores() {
        let buckets = lead_score_buckets(&sample());
        assert_eq!(buckets, LeadBuckets { high: 2, medium: 1, low: 1 });
    }

    #[test]
    fn top_by_orders_descending() {
        let table = sample();
        let top: Vec<&str> = top_by(&table, Column::LeadScore, 3)
            .into_iter()
            .map(|r| r.contact_id.as_str())
            .collect();
        assert_eq!(top, vec!["3", "1", "2"]);

        let all = top_by(&table, Column::LeadScore, 10);
        assert_eq!(all.last().map(|r| r.contact_id.as_str()), Some("4"));
    }

    #[test]
    fn orderings() {
        assert!(timeline_rank("30 days") < timeline_rank("90+ days"));
        assert_eq!(timeline_rank("next year"), None);
        assert_eq!(sentiment_score("Mixed"), Some(1.5));
    }
}
