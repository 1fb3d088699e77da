use serde::Serialize;

use super::counts::{FrequencyCounter, Frequencies};
use crate::data::model::{Column, ContactTable};

/// Summary statistics for one (possibly filtered) table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub total_contacts: usize,
    pub avg_engagement_score: Option<f64>,
    pub avg_lead_score: Option<f64>,
    pub avg_enthusiasm_level: Option<f64>,
    pub avg_completion_rate: Option<f64>,
    pub sentiment_distribution: Frequencies,
    pub challenge_categories: Frequencies,
    pub role_distribution: Frequencies,
    pub preferred_channels: Frequencies,
    pub industry_verticals: Frequencies,
}

impl AggregateMetrics {
    /// Zero count, no means, empty distributions.
    pub fn empty() -> Self {
        Self::default()
    }
}

pub fn aggregate_metrics(table: &ContactTable) -> AggregateMetrics {
    if table.is_empty() {
        return AggregateMetrics::empty();
    }

    AggregateMetrics {
        total_contacts: table.len(),
        avg_engagement_score: column_mean(table, Column::OverallScore),
        avg_lead_score: column_mean(table, Column::LeadScore),
        avg_enthusiasm_level: column_mean(table, Column::EnthusiasmLevel),
        avg_completion_rate: column_mean(table, Column::CompletionRate),
        sentiment_distribution: value_counts(table, Column::OverallSentiment),
        challenge_categories: value_counts(table, Column::ChallengeCategory),
        role_distribution: value_counts(table, Column::Role),
        preferred_channels: value_counts(table, Column::PreferredChannel),
        industry_verticals: value_counts(table, Column::IndustryVertical),
    }
}

/// Mean over valid values only; `None` when there are none.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn column_mean(table: &ContactTable, column: Column) -> Option<f64> {
    mean(table.numbers(column))
}

/// Distribution of a text column's non-empty values.
pub fn value_counts(table: &ContactTable, column: Column) -> Frequencies {
    table
        .iter()
        .filter_map(|row| row.text(column))
        .filter(|value| !value.is_empty())
        .collect::<FrequencyCounter>()
        .most_common(None)
}
