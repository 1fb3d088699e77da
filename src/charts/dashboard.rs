use eframe::egui::Color32;

use super::{
    Bar, BarChart, Gauge, GaugeBand, Heatmap, Histogram, Orientation, PieChart, RadarChart,
    ScatterChart, ScatterPoint, Series, Slice, StackedBars,
};
use crate::analytics::correlation::correlation_matrix;
use crate::analytics::counts::{FrequencyCounter, Frequencies};
use crate::analytics::groups::{crosstab, mean_by_group, timeline_rank, SEVERITY_ORDER, TECH_ADOPTION_ORDER};
use crate::analytics::keywords::{extract_keywords, extract_top_keywords};
use crate::analytics::metrics::value_counts;
use crate::color::{generate_palette, sentiment_color, severity_color, ColorScale, UNCATEGORISED};
use crate::data::model::{Column, ContactTable};

/// Bars shown by [`keyword_bars`].
pub const KEYWORD_BARS: usize = 15;
/// Bars shown for pain points and objections.
pub const TOP_ISSUES: usize = 10;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pie(title: &str, freq: Frequencies, color: impl Fn(&str, usize) -> Color32) -> PieChart {
    let slices = freq
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Slice {
            label: label.to_string(),
            count,
            color: color(label, i),
        })
        .collect();
    PieChart {
        title: title.to_string(),
        slices,
        hole: 0.0,
    }
}

fn palette_pie(title: &str, freq: Frequencies) -> PieChart {
    let colors = generate_palette(freq.len());
    pie(title, freq, |_, i| colors[i])
}

/// Horizontal bars, smallest at the bottom, colored by count.
fn ranked_bars(title: &str, category: &str, value: &str, freq: &Frequencies, scale: ColorScale) -> BarChart {
    let max = freq.iter().map(|(_, n)| n).max().unwrap_or_default() as f64;
    let mut bars: Vec<Bar> = freq
        .iter()
        .map(|(label, n)| Bar {
            label: label.to_string(),
            value: n as f64,
            color: scale.at_range(n as f64, 0.0, max),
        })
        .collect();
    bars.reverse();
    BarChart {
        title: title.to_string(),
        category_label: category.to_string(),
        value_label: value.to_string(),
        orientation: Orientation::Horizontal,
        bars,
    }
}

fn column_bars(title: &str, category: &str, counts: Vec<(String, usize)>, colors: &[Color32]) -> BarChart {
    let bars = counts
        .into_iter()
        .enumerate()
        .map(|(i, (label, n))| Bar {
            label,
            value: n as f64,
            color: colors.get(i).copied().unwrap_or(UNCATEGORISED),
        })
        .collect();
    BarChart {
        title: title.to_string(),
        category_label: category.to_string(),
        value_label: "Number of Contacts".to_string(),
        orientation: Orientation::Vertical,
        bars,
    }
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn sentiment_distribution(table: &ContactTable) -> PieChart {
    pie(
        "Overall Sentiment Distribution",
        value_counts(table, Column::OverallSentiment),
        |label, _| sentiment_color(label),
    )
}

pub fn challenge_categories(table: &ContactTable) -> BarChart {
    ranked_bars(
        "Challenge Categories",
        "Challenge Category",
        "Number of Contacts",
        &value_counts(table, Column::ChallengeCategory),
        ColorScale::blues(),
    )
}

/// One bin per integer score 0-5.
pub fn lead_score_histogram(table: &ContactTable) -> Histogram {
    Histogram::from_values(
        "Lead Score Distribution",
        "Lead Score",
        table.numbers(Column::LeadScore),
        -0.5,
        1.0,
        6,
    )
}

/// One bin per integer level 0-10.
pub fn enthusiasm_histogram(table: &ContactTable) -> Histogram {
    let mut hist = Histogram::from_values(
        "Enthusiasm Level Distribution",
        "Enthusiasm Level (0-10)",
        table.numbers(Column::EnthusiasmLevel),
        -0.5,
        1.0,
        11,
    );
    hist.color = Color32::from_rgb(0x9c, 0x27, 0xb0);
    hist
}

/// Engagement on x, enthusiasm on y, colored by lead score, sized by completion.
pub fn engagement_vs_enthusiasm(table: &ContactTable) -> ScatterChart {
    let scale = ColorScale::viridis();
    let points = table
        .iter()
        .filter_map(|row| {
            let x = row.overall_score?;
            let y = row.enthusiasm_level?;
            let completion = row.completion_rate.unwrap_or(0.0).clamp(0.0, 100.0);
            Some(ScatterPoint {
                x,
                y,
                radius: 3.0 + (completion / 100.0 * 9.0) as f32,
                color: row
                    .lead_score
                    .map_or(UNCATEGORISED, |lead| scale.at_range(lead, 0.0, 5.0)),
                label: format!("{} ({})", row.full_name, row.role),
            })
        })
        .collect();
    ScatterChart {
        title: "Engagement Score vs. Enthusiasm Level".to_string(),
        x_label: "Engagement Score".to_string(),
        y_label: "Enthusiasm Level".to_string(),
        points,
    }
}

/// Top [`KEYWORD_BARS`] entries of a frequency table.
pub fn keyword_bars(title: &str, keywords: &Frequencies) -> BarChart {
    let top: Frequencies = keywords.clone().into_vec().into_iter().take(KEYWORD_BARS).collect();
    ranked_bars(title, "Keyword", "Frequency", &top, ColorScale::viridis())
}

pub fn completion_rate_gauge(avg_completion_rate: Option<f64>) -> Gauge {
    Gauge {
        title: "Avg. Completion Rate".to_string(),
        value: avg_completion_rate,
        min: 0.0,
        max: 100.0,
        bands: vec![
            GaugeBand { from: 0.0, to: 33.0, color: Color32::from_rgb(0xef, 0x53, 0x50) },
            GaugeBand { from: 33.0, to: 66.0, color: Color32::from_rgb(0xff, 0xca, 0x28) },
            GaugeBand { from: 66.0, to: 100.0, color: Color32::from_rgb(0x66, 0xbb, 0x6a) },
        ],
    }
}

/// Industry pie; "Unknown" is shown as "Not Specified".
pub fn industry_verticals(table: &ContactTable) -> PieChart {
    let freq = table
        .iter()
        .map(|row| match row.industry_vertical.as_str() {
            "Unknown" => "Not Specified",
            other => other,
        })
        .collect::<FrequencyCounter>()
        .most_common(None);
    palette_pie("Industry Vertical Distribution", freq)
}

pub fn role_distribution(table: &ContactTable) -> PieChart {
    palette_pie("Role Distribution", value_counts(table, Column::Role))
}

pub fn preferred_channels(table: &ContactTable) -> BarChart {
    let freq = value_counts(table, Column::PreferredChannel);
    let colors = generate_palette(freq.len());
    let mut chart = ranked_bars(
        "Preferred Communication Channels",
        "Channel",
        "Number of Contacts",
        &freq,
        ColorScale::blues(),
    );
    let n = chart.bars.len();
    for (i, bar) in chart.bars.iter_mut().enumerate() {
        bar.color = colors[n - 1 - i];
    }
    chart
}

/// Timelines in calendar order; unrecognised values last.
pub fn timeline_distribution(table: &ContactTable) -> BarChart {
    let mut counts = value_counts(table, Column::EstimatedTimeline).into_vec();
    counts.sort_by_key(|(label, _)| timeline_rank(label).unwrap_or(u32::MAX));
    let colors = generate_palette(counts.len());
    column_bars("Estimated Timeline Distribution", "Estimated Timeline", counts, &colors)
}

/// Adoption levels in maturity order; levels with no contacts are left out.
pub fn tech_adoption(table: &ContactTable) -> BarChart {
    let freq = value_counts(table, Column::TechAdoptionLevel);
    let counts: Vec<(String, usize)> = TECH_ADOPTION_ORDER
        .iter()
        .filter_map(|level| freq.get(level).map(|n| (level.to_string(), n)))
        .collect();
    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or_default() as f64;
    let scale = ColorScale::viridis();
    let colors: Vec<Color32> = counts.iter().map(|(_, n)| scale.at_range(*n as f64, 0.0, max)).collect();
    column_bars("Technology Adoption Levels", "Technology Adoption Level", counts, &colors)
}

/// Top pain points across the table.
pub fn pain_points(table: &ContactTable) -> BarChart {
    let freq = extract_top_keywords(table, Column::PainPoints, TOP_ISSUES);
    ranked_bars("Top Pain Points", "Pain Point", "Frequency", &freq, ColorScale::reds())
}

/// Normalised profile of one contact, `None` if the id is not in the table.
/// Missing metrics plot at zero.
pub fn contact_radar(table: &ContactTable, contact_id: &str) -> Option<RadarChart> {
    let row = table.get(contact_id)?;
    let axis = |name: &str, value: Option<f64>, max: f64| (name.to_string(), value.unwrap_or(0.0) / max);
    Some(RadarChart {
        title: format!("Contact Performance: {}", row.full_name),
        axes: vec![
            axis("Engagement Score", row.overall_score, 100.0),
            axis("Lead Score", row.lead_score, 5.0),
            axis("Enthusiasm", row.enthusiasm_level, 10.0),
            axis("Completion Rate", row.completion_rate, 100.0),
        ],
    })
}

pub fn correlation_heatmap(table: &ContactTable) -> Heatmap {
    let matrix = correlation_matrix(table);
    Heatmap {
        title: "Correlation Between Key Metrics".to_string(),
        labels: matrix.columns.iter().map(|c| c.label()).collect(),
        values: matrix.values,
    }
}

// ---------------------------------------------------------------------------
// Sentiment page
// ---------------------------------------------------------------------------

pub fn sentiment_progression(table: &ContactTable) -> PieChart {
    let mut chart = palette_pie(
        "Sentiment Progression Distribution",
        value_counts(table, Column::SentimentProgression),
    );
    chart.hole = 0.4;
    chart
}

pub fn satisfaction_signals(table: &ContactTable) -> BarChart {
    keyword_bars(
        "Top Satisfaction Signals",
        &extract_keywords(table, Column::SatisfactionSignals),
    )
}

// ---------------------------------------------------------------------------
// Challenge page
// ---------------------------------------------------------------------------

/// Severity in Critical → Low order, other values after.
pub fn severity_distribution(table: &ContactTable) -> BarChart {
    let mut counts = value_counts(table, Column::SeverityLevel).into_vec();
    counts.sort_by_key(|(label, _)| {
        SEVERITY_ORDER
            .iter()
            .position(|s| s == label)
            .unwrap_or(SEVERITY_ORDER.len())
    });
    let colors: Vec<Color32> = counts.iter().map(|(label, _)| severity_color(label)).collect();
    column_bars("Challenge Severity Distribution", "Severity", counts, &colors)
}

pub fn impact_areas(table: &ContactTable) -> PieChart {
    palette_pie(
        "Challenge Impact Area Distribution",
        value_counts(table, Column::ImpactArea),
    )
}

pub fn category_by_severity(table: &ContactTable) -> StackedBars {
    let tab = crosstab(table, Column::ChallengeCategory, Column::SeverityLevel);
    let series = tab
        .columns
        .iter()
        .enumerate()
        .map(|(c, severity)| Series {
            name: severity.clone(),
            values: tab.counts.iter().map(|row| row[c]).collect(),
            color: severity_color(severity),
        })
        .collect();
    StackedBars {
        title: "Challenge Categories by Severity Level".to_string(),
        categories: tab.rows,
        series,
    }
}

/// Mean lead score per distinct value of `group`, highest first.
pub fn avg_lead_score_by(table: &ContactTable, group: Column) -> BarChart {
    let means: Vec<(String, f64)> = mean_by_group(table, group, Column::LeadScore)
        .into_iter()
        .filter_map(|(label, mean)| Some((label, mean?)))
        .collect();
    let scale = ColorScale::viridis();
    let bars = means
        .into_iter()
        .map(|(label, mean)| Bar {
            label,
            value: mean,
            color: scale.at_range(mean, 0.0, 5.0),
        })
        .collect();
    BarChart {
        title: format!("Average Lead Score by {}", group.label()),
        category_label: group.label(),
        value_label: "Average Lead Score".to_string(),
        orientation: Orientation::Vertical,
        bars,
    }
}

// ---------------------------------------------------------------------------
// Sales page
// ---------------------------------------------------------------------------

pub fn budget_indicators(table: &ContactTable) -> PieChart {
    palette_pie(
        "Budget Indicator Distribution",
        value_counts(table, Column::BudgetIndicator),
    )
}

pub fn decision_makers(table: &ContactTable) -> BarChart {
    let counts = value_counts(table, Column::DecisionMakerStatus).into_vec();
    let max = counts.first().map(|(_, n)| *n).unwrap_or_default() as f64;
    let scale = ColorScale::viridis();
    let colors: Vec<Color32> = counts.iter().map(|(_, n)| scale.at_range(*n as f64, 0.0, max)).collect();
    column_bars("Decision Maker Status Distribution", "Decision Maker Status", counts, &colors)
}

pub fn objections(table: &ContactTable) -> BarChart {
    let freq = extract_top_keywords(table, Column::ObjectionsToAddress, TOP_ISSUES);
    ranked_bars("Top Objections to Address", "Objection", "Frequency", &freq, ColorScale::reds())
}

// ---------------------------------------------------------------------------
// Industry page
// ---------------------------------------------------------------------------

pub fn company_sizes(table: &ContactTable) -> PieChart {
    palette_pie(
        "Company Size Distribution",
        value_counts(table, Column::CompanySizeIndicator),
    )
}

pub fn competitive_positions(table: &ContactTable) -> BarChart {
    ranked_bars(
        "Competitive Position",
        "Position",
        "Number of Contacts",
        &value_counts(table, Column::CompetitivePosition),
        ColorScale::blues(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{tests::contact, ContactRecord};
    use pretty_assertions::assert_eq;

    fn row(id: &str, f: impl FnOnce(&mut ContactRecord)) -> ContactRecord {
        let mut r = contact(id, "CTO");
        f(&mut r);
        r
    }

    #[test]
    fn sentiment_pie_uses_fixed_colors() {
        let table = ContactTable::from_records(vec![
            row("1", |r| r.overall_sentiment = "Positive".into()),
            row("2", |r| r.overall_sentiment = "Positive".into()),
            row("3", |r| r.overall_sentiment = "Weird".into()),
        ]);
        let chart = sentiment_distribution(&table);
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(chart.slices[0].label, "Positive");
        assert_eq!(chart.slices[0].color, sentiment_color("Positive"));
        assert_eq!(chart.slices[1].color, UNCATEGORISED);
        assert!((chart.fraction(0) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn ranked_bars_put_largest_on_top() {
        let table = ContactTable::from_records(vec![
            row("1", |r| r.challenge_category = "Hiring".into()),
            row("2", |r| r.challenge_category = "Scaling".into()),
            row("3", |r| r.challenge_category = "Scaling".into()),
        ]);
        let chart = challenge_categories(&table);
        assert_eq!(chart.orientation, Orientation::Horizontal);
        assert_eq!(chart.labels(), vec!["Hiring", "Scaling"]);
    }

    #[test]
    fn lead_histogram_bins_by_integer() {
        let table = ContactTable::from_records(vec![
            row("1", |r| r.lead_score = Some(0.0)),
            row("2", |r| r.lead_score = Some(5.0)),
            row("3", |r| r.lead_score = Some(5.0)),
            row("4", |r| r.lead_score = None),
        ]);
        let hist = lead_score_histogram(&table);
        assert_eq!(hist.counts, vec![1, 0, 0, 0, 0, 2]);
        assert_eq!(hist.bin_center(5), 5.0);
    }

    #[test]
    fn scatter_skips_rows_without_both_axes() {
        let table = ContactTable::from_records(vec![
            row("1", |r| {
                r.overall_score = Some(80.0);
                r.enthusiasm_level = Some(7.0);
                r.completion_rate = Some(100.0);
            }),
            row("2", |r| r.enthusiasm_level = None),
        ]);
        let chart = engagement_vs_enthusiasm(&table);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].radius, 12.0);
    }

    #[test]
    fn industry_unknown_is_renamed() {
        let table = ContactTable::from_records(vec![row("1", |r| r.industry_vertical = "Unknown".into())]);
        let chart = industry_verticals(&table);
        assert_eq!(chart.slices[0].label, "Not Specified");
    }

    #[test]
    fn tech_adoption_follows_fixed_order_and_drops_others() {
        let table = ContactTable::from_records(vec![
            row("1", |r| r.tech_adoption_level = "Laggard".into()),
            row("2", |r| r.tech_adoption_level = "Innovator".into()),
            row("3", |r| r.tech_adoption_level = "Curious".into()),
        ]);
        assert_eq!(tech_adoption(&table).labels(), vec!["Innovator", "Laggard"]);
    }

    #[test]
    fn timelines_sort_by_rank_with_unknown_text_last() {
        let table = ContactTable::from_records(vec![
            row("1", |r| r.estimated_timeline = "Someday".into()),
            row("2", |r| r.estimated_timeline = "90+ days".into()),
            row("3", |r| r.estimated_timeline = "30 days".into()),
            row("4", |r| r.estimated_timeline = "Unknown".into()),
        ]);
        assert_eq!(
            timeline_distribution(&table).labels(),
            vec!["30 days", "90+ days", "Unknown", "Someday"]
        );
    }

    #[test]
    fn severity_follows_fixed_order() {
        let table = ContactTable::from_records(vec![
            row("1", |r| r.severity_level = "Low".into()),
            row("2", |r| r.severity_level = "Critical".into()),
        ]);
        assert_eq!(severity_distribution(&table).labels(), vec!["Critical", "Low"]);
    }

    #[test]
    fn radar_normalises_metrics() {
        let table = ContactTable::from_records(vec![row("c1", |r| {
            r.full_name = "Jane Doe".into();
            r.overall_score = Some(50.0);
            r.lead_score = Some(4.0);
            r.enthusiasm_level = Some(10.0);
            r.completion_rate = None;
        })]);
        let radar = contact_radar(&table, "c1").unwrap();
        assert_eq!(radar.title, "Contact Performance: Jane Doe");
        let values: Vec<f64> = radar.axes.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0.5, 0.8, 1.0, 0.0]);
        assert!(contact_radar(&table, "nobody").is_none());
    }

    #[test]
    fn keyword_bars_cap_at_fifteen() {
        let words: Vec<String> = (0..18).map(|i| format!("k{i}")).collect();
        let table = ContactTable::from_records(vec![row("1", |r| r.challenge_keywords = words)]);
        let chart = keyword_bars("Top Keywords", &extract_keywords(&table, Column::ChallengeKeywords));
        assert_eq!(chart.bars.len(), KEYWORD_BARS);
    }

    #[test]
    fn stacked_severity_series_align_with_categories() {
        let table = ContactTable::from_records(vec![
            row("1", |r| {
                r.challenge_category = "Hiring".into();
                r.severity_level = "High".into();
            }),
            row("2", |r| {
                r.challenge_category = "Scaling".into();
                r.severity_level = "High".into();
            }),
            row("3", |r| {
                r.challenge_category = "Scaling".into();
                r.severity_level = "Low".into();
            }),
        ]);
        let stacked = category_by_severity(&table);
        assert_eq!(stacked.categories, vec!["Hiring", "Scaling"]);
        assert_eq!(stacked.series[0].name, "High");
        assert_eq!(stacked.series[0].values, vec![1, 1]);
        assert_eq!(stacked.series[1].values, vec![0, 1]);
    }

    #[test]
    fn gauge_fraction_handles_missing_value() {
        assert_eq!(completion_rate_gauge(None).fraction(), None);
        assert_eq!(completion_rate_gauge(Some(50.0)).fraction(), Some(0.5));
        assert_eq!(completion_rate_gauge(Some(150.0)).fraction(), Some(1.0));
    }
}
