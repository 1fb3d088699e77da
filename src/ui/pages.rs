use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::analytics::groups::{
    crosstab, lead_score_buckets, mean_by_group, mean_by_group_with, mode_by_group, sentiment_score, top_by,
};
use crate::charts::dashboard;
use crate::data::model::{Column, ContactRecord, ContactTable};
use crate::state::{Action, AppState, Page};
use crate::ui::{plot, table};

/// Columns of the contact overview tables.
const SUMMARY_COLUMNS: [Column; 7] = [
    Column::FullName,
    Column::Company,
    Column::Role,
    Column::OverallSentiment,
    Column::OverallScore,
    Column::LeadScore,
    Column::EnthusiasmLevel,
];

const PROSPECT_COLUMNS: [Column; 8] = [
    Column::FullName,
    Column::Company,
    Column::Role,
    Column::LeadScore,
    Column::EstimatedTimeline,
    Column::BudgetIndicator,
    Column::DecisionMakerStatus,
    Column::RecommendedNextStep,
];

/// Detail page sections.
const DETAIL_SECTIONS: [(&str, &[Column]); 7] = [
    ("Basic Information", &[Column::ContactId, Column::FullName, Column::Company, Column::Role]),
    (
        "Challenge",
        &[
            Column::RawChallenge,
            Column::ChallengeCategory,
            Column::ChallengeKeywords,
            Column::SeverityLevel,
            Column::ImpactArea,
        ],
    ),
    (
        "Engagement",
        &[
            Column::Participated,
            Column::CompletionRate,
            Column::CompletedActivities,
            Column::ResponseSpeed,
            Column::CompletedFullHunt,
            Column::OverallScore,
            Column::ResponsePattern,
            Column::InterestedFeatures,
            Column::ConversationDepth,
            Column::ContactSharingWillingness,
        ],
    ),
    (
        "Sentiment",
        &[
            Column::OverallSentiment,
            Column::SentimentProgression,
            Column::EnthusiasmLevel,
            Column::PainPoints,
            Column::SatisfactionSignals,
        ],
    ),
    (
        "Industry",
        &[
            Column::CompanySizeIndicator,
            Column::IndustryVertical,
            Column::TechAdoptionLevel,
            Column::CompetitivePosition,
        ],
    ),
    (
        "Recommendations",
        &[
            Column::RecommendedNextStep,
            Column::SuggestedContent,
            Column::IdealFollowUpTime,
            Column::PreferredChannel,
            Column::KeyTalkingPoints,
        ],
    ),
    (
        "Sales Qualification",
        &[
            Column::LeadScore,
            Column::EstimatedTimeline,
            Column::ObjectionsToAddress,
            Column::BudgetIndicator,
            Column::DecisionMakerStatus,
        ],
    ),
];

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Render the selected page for the filtered view.
pub fn show(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    ui.heading(state.page.title());
    ui.separator();

    if state.data.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded. Open a file (File → Open…) or drop a JSON file here.");
        });
        return;
    }
    if state.view.table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No contacts match the current filters.");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Overview => overview(ui, state, actions),
            Page::ContactDetails => contact_details(ui, state, actions),
            Page::Sentiment => sentiment(ui, state),
            Page::Challenges => challenges(ui, state),
            Page::Sales => sales(ui, state, actions),
            Page::Industry => industry(ui, state),
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn average(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}"))
}

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.weak(label);
            ui.label(RichText::new(value).heading().strong());
        });
    });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).heading());
    ui.separator();
}

/// Two widgets side by side.
fn pair(ui: &mut Ui, left: impl FnOnce(&mut Ui), right: impl FnOnce(&mut Ui)) {
    ui.columns(2, |cols| {
        left(&mut cols[0]);
        right(&mut cols[1]);
    });
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    let view = &state.view;
    let metrics = &view.metrics;
    let t = &view.table;

    ui.columns(5, |cols| {
        metric_card(&mut cols[0], "Total Contacts", metrics.total_contacts.to_string());
        metric_card(&mut cols[1], "Avg. Engagement Score", average(metrics.avg_engagement_score));
        metric_card(&mut cols[2], "Avg. Lead Score", average(metrics.avg_lead_score));
        metric_card(&mut cols[3], "Avg. Enthusiasm", average(metrics.avg_enthusiasm_level));
        metric_card(
            &mut cols[4],
            "Avg. Completion Rate",
            metrics
                .avg_completion_rate
                .map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}%")),
        );
    });

    section(ui, "Distribution");
    pair(
        ui,
        |ui| plot::pie_chart(ui, &dashboard::sentiment_distribution(t)),
        |ui| plot::bar_chart(ui, &dashboard::challenge_categories(t)),
    );
    pair(
        ui,
        |ui| plot::histogram(ui, &dashboard::lead_score_histogram(t)),
        |ui| plot::gauge(ui, &dashboard::completion_rate_gauge(metrics.avg_completion_rate)),
    );

    section(ui, "Engagement");
    pair(
        ui,
        |ui| plot::scatter(ui, &dashboard::engagement_vs_enthusiasm(t)),
        |ui| plot::bar_chart(ui, &dashboard::keyword_bars("Top Challenge Keywords", &view.challenge_keywords)),
    );
    plot::heatmap(ui, &dashboard::correlation_heatmap(t));

    section(ui, "Audience");
    pair(
        ui,
        |ui| plot::pie_chart(ui, &dashboard::industry_verticals(t)),
        |ui| plot::pie_chart(ui, &dashboard::role_distribution(t)),
    );
    pair(
        ui,
        |ui| plot::bar_chart(ui, &dashboard::preferred_channels(t)),
        |ui| plot::bar_chart(ui, &dashboard::timeline_distribution(t)),
    );
    pair(
        ui,
        |ui| plot::bar_chart(ui, &dashboard::tech_adoption(t)),
        |ui| plot::bar_chart(ui, &dashboard::pain_points(t)),
    );

    section(ui, "Most Engaged Contacts");
    let top = top_by(t, Column::OverallScore, 5);
    table::contact_table(ui, "top_engaged", &top, &SUMMARY_COLUMNS, actions);

    section(ui, "All Contacts");
    let rows: Vec<&ContactRecord> = t.iter().collect();
    table::contact_table(ui, "all_contacts", &rows, &SUMMARY_COLUMNS, actions);
}

// ---------------------------------------------------------------------------
// Contact details
// ---------------------------------------------------------------------------

fn contact_details(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    let Some(record) = state.selected_record() else {
        return;
    };

    egui::ComboBox::from_label("Contact")
        .selected_text(format!("{} ({})", record.full_name, record.company))
        .width(320.0)
        .show_ui(ui, |ui: &mut Ui| {
            for row in &state.view.table {
                let selected = row.contact_id == record.contact_id;
                let label = format!("{} ({})", row.full_name, row.company);
                if ui.selectable_label(selected, label).clicked() {
                    actions.push(Action::SelectContact(row.contact_id.clone()));
                }
            }
        });
    ui.add_space(8.0);

    pair(
        ui,
        |ui| {
            if let Some(radar) = dashboard::contact_radar(&state.view.table, &record.contact_id) {
                plot::radar(ui, &radar);
            }
        },
        |ui| details_grid(ui, record, &DETAIL_SECTIONS[..2]),
    );
    details_grid(ui, record, &DETAIL_SECTIONS[2..]);
}

fn details_grid(ui: &mut Ui, record: &ContactRecord, sections: &[(&str, &[Column])]) {
    for (title, columns) in sections {
        section(ui, title);
        egui::Grid::new(*title)
            .num_columns(2)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui: &mut Ui| {
                for &column in *columns {
                    ui.strong(column.label());
                    let value = record.display(column);
                    if value.is_empty() {
                        ui.weak("N/A");
                    } else {
                        ui.add(egui::Label::new(value).wrap());
                    }
                    ui.end_row();
                }
            });
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

fn sentiment(ui: &mut Ui, state: &AppState) {
    let t = &state.view.table;

    pair(
        ui,
        |ui| plot::pie_chart(ui, &dashboard::sentiment_distribution(t)),
        |ui| plot::pie_chart(ui, &dashboard::sentiment_progression(t)),
    );
    pair(
        ui,
        |ui| plot::histogram(ui, &dashboard::enthusiasm_histogram(t)),
        |ui| plot::bar_chart(ui, &dashboard::satisfaction_signals(t)),
    );

    section(ui, "Sentiment by Role");
    table::text_table(
        ui,
        "sentiment_by_role",
        &["Role", "Most Common Sentiment", "Avg. Sentiment Score", "Avg. Enthusiasm"],
        &sentiment_by_role(t),
    );
}

/// One row per role: modal sentiment, mean sentiment score, mean enthusiasm.
fn sentiment_by_role(t: &ContactTable) -> Vec<Vec<String>> {
    let scores = mean_by_group_with(t, Column::Role, |row| sentiment_score(&row.overall_sentiment));
    let enthusiasm = mean_by_group(t, Column::Role, Column::EnthusiasmLevel);
    let lookup = |means: &[(String, Option<f64>)], role: &str| {
        average(means.iter().find(|(k, _)| k == role).and_then(|(_, v)| *v))
    };
    mode_by_group(t, Column::Role, Column::OverallSentiment)
        .into_iter()
        .map(|(role, mode)| {
            let avg_score = lookup(&scores, &role);
            let avg_enthusiasm = lookup(&enthusiasm, &role);
            vec![role, mode.unwrap_or_else(|| "N/A".to_string()), avg_score, avg_enthusiasm]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

fn challenges(ui: &mut Ui, state: &AppState) {
    let t = &state.view.table;

    pair(
        ui,
        |ui| plot::bar_chart(ui, &dashboard::challenge_categories(t)),
        |ui| plot::bar_chart(ui, &dashboard::severity_distribution(t)),
    );
    pair(
        ui,
        |ui| plot::pie_chart(ui, &dashboard::impact_areas(t)),
        |ui| {
            let keywords = &state.view.challenge_keywords;
            plot::bar_chart(ui, &dashboard::keyword_bars("Top Challenge Keywords", keywords));
            ui.weak(format!(
                "{} mentions of the top {} keywords across {} contacts",
                keywords.total(),
                keywords.len(),
                t.len()
            ));
        },
    );
    plot::stacked_bars(ui, &dashboard::category_by_severity(t));
    pair(
        ui,
        |ui| plot::bar_chart(ui, &dashboard::avg_lead_score_by(t, Column::ChallengeCategory)),
        |ui| plot::bar_chart(ui, &dashboard::pain_points(t)),
    );
}

// ---------------------------------------------------------------------------
// Sales qualification
// ---------------------------------------------------------------------------

fn sales(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    let t = &state.view.table;
    let buckets = lead_score_buckets(t);

    ui.columns(3, |cols| {
        metric_card(&mut cols[0], "High-Value Leads (4+)", buckets.high.to_string());
        metric_card(&mut cols[1], "Medium-Value Leads (2-4)", buckets.medium.to_string());
        metric_card(&mut cols[2], "Low-Value Leads (<2)", buckets.low.to_string());
    });
    ui.add_space(8.0);

    pair(
        ui,
        |ui| plot::histogram(ui, &dashboard::lead_score_histogram(t)),
        |ui| plot::bar_chart(ui, &dashboard::avg_lead_score_by(t, Column::Role)),
    );
    pair(
        ui,
        |ui| plot::pie_chart(ui, &dashboard::budget_indicators(t)),
        |ui| plot::bar_chart(ui, &dashboard::decision_makers(t)),
    );
    pair(
        ui,
        |ui| plot::bar_chart(ui, &dashboard::timeline_distribution(t)),
        |ui| plot::bar_chart(ui, &dashboard::objections(t)),
    );

    section(ui, "Top Prospects");
    let prospects = top_by(t, Column::LeadScore, 10);
    table::contact_table(ui, "top_prospects", &prospects, &PROSPECT_COLUMNS, actions);
}

// ---------------------------------------------------------------------------
// Industry
// ---------------------------------------------------------------------------

fn industry(ui: &mut Ui, state: &AppState) {
    let t = &state.view.table;

    pair(
        ui,
        |ui| plot::pie_chart(ui, &dashboard::industry_verticals(t)),
        |ui| plot::pie_chart(ui, &dashboard::company_sizes(t)),
    );
    pair(
        ui,
        |ui| plot::bar_chart(ui, &dashboard::tech_adoption(t)),
        |ui| plot::bar_chart(ui, &dashboard::competitive_positions(t)),
    );
    plot::bar_chart(ui, &dashboard::preferred_channels(t));

    section(ui, "Technology Adoption by Industry");
    let tab = crosstab(t, Column::IndustryVertical, Column::TechAdoptionLevel);
    let mut headers: Vec<&str> = vec!["Industry"];
    headers.extend(tab.columns.iter().map(String::as_str));
    let rows: Vec<Vec<String>> = tab
        .rows
        .iter()
        .map(|industry| {
            std::iter::once(industry.clone())
                .chain(tab.columns.iter().map(|level| tab.get(industry, level).to_string()))
                .collect()
        })
        .collect();
    table::text_table(ui, "adoption_by_industry", &headers, &rows);

    section(ui, "Preferred Channel by Industry");
    let rows: Vec<Vec<String>> = mode_by_group(t, Column::IndustryVertical, Column::PreferredChannel)
        .into_iter()
        .map(|(industry, channel)| vec![industry, channel.unwrap_or_else(|| "N/A".to_string())])
        .collect();
    table::text_table(ui, "channel_by_industry", &["Industry", "Most Common Channel"], &rows);
}
