use std::collections::{BTreeSet, HashMap};
use std::fmt;

// ---------------------------------------------------------------------------
// Schema – every column of the flattened table with its explicit type tag
// ---------------------------------------------------------------------------

/// Storage kind of a column, fixed by the schema rather than probed per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    /// Ordered sequence of strings, joined with `", "` only when rendered.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    ContactId,
    FullName,
    Company,
    Role,
    RawChallenge,
    ChallengeCategory,
    ChallengeKeywords,
    SeverityLevel,
    ImpactArea,
    Participated,
    CompletionRate,
    CompletedActivities,
    ResponseSpeed,
    CompletedFullHunt,
    OverallScore,
    ResponsePattern,
    InterestedFeatures,
    ConversationDepth,
    ContactSharingWillingness,
    OverallSentiment,
    SentimentProgression,
    EnthusiasmLevel,
    PainPoints,
    SatisfactionSignals,
    CompanySizeIndicator,
    IndustryVertical,
    TechAdoptionLevel,
    CompetitivePosition,
    RecommendedNextStep,
    SuggestedContent,
    IdealFollowUpTime,
    PreferredChannel,
    KeyTalkingPoints,
    LeadScore,
    EstimatedTimeline,
    ObjectionsToAddress,
    BudgetIndicator,
    DecisionMakerStatus,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 38] = [
        Column::ContactId,
        Column::FullName,
        Column::Company,
        Column::Role,
        Column::RawChallenge,
        Column::ChallengeCategory,
        Column::ChallengeKeywords,
        Column::SeverityLevel,
        Column::ImpactArea,
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
        Column::OverallSentiment,
        Column::SentimentProgression,
        Column::EnthusiasmLevel,
        Column::PainPoints,
        Column::SatisfactionSignals,
        Column::CompanySizeIndicator,
        Column::IndustryVertical,
        Column::TechAdoptionLevel,
        Column::CompetitivePosition,
        Column::RecommendedNextStep,
        Column::SuggestedContent,
        Column::IdealFollowUpTime,
        Column::PreferredChannel,
        Column::KeyTalkingPoints,
        Column::LeadScore,
        Column::EstimatedTimeline,
        Column::ObjectionsToAddress,
        Column::BudgetIndicator,
        Column::DecisionMakerStatus,
    ];

    /// Column name as it appears in exports and filter maps.
    pub fn name(self) -> &'static str {
        match self {
            Column::ContactId => "contact_id",
            Column::FullName => "full_name",
            Column::Company => "company",
            Column::Role => "role",
            Column::RawChallenge => "raw_challenge",
            Column::ChallengeCategory => "challenge_category",
            Column::ChallengeKeywords => "challenge_keywords",
            Column::SeverityLevel => "severity_level",
            Column::ImpactArea => "impact_area",
            Column::Participated => "participated",
            Column::CompletionRate => "completion_rate",
            Column::CompletedActivities => "completed_activities",
            Column::ResponseSpeed => "response_speed",
            Column::CompletedFullHunt => "completed_full_hunt",
            Column::OverallScore => "overall_score",
            Column::ResponsePattern => "response_pattern",
            Column::InterestedFeatures => "interested_features",
            Column::ConversationDepth => "conversation_depth",
            Column::ContactSharingWillingness => "contact_sharing_willingness",
            Column::OverallSentiment => "overall_sentiment",
            Column::SentimentProgression => "sentiment_progression",
            Column::EnthusiasmLevel => "enthusiasm_level",
            Column::PainPoints => "pain_points",
            Column::SatisfactionSignals => "satisfaction_signals",
            Column::CompanySizeIndicator => "company_size_indicator",
            Column::IndustryVertical => "industry_vertical",
            Column::TechAdoptionLevel => "tech_adoption_level",
            Column::CompetitivePosition => "competitive_position",
            Column::RecommendedNextStep => "recommended_next_step",
            Column::SuggestedContent => "suggested_content",
            Column::IdealFollowUpTime => "ideal_follow_up_time",
            Column::PreferredChannel => "preferred_channel",
            Column::KeyTalkingPoints => "key_talking_points",
            Column::LeadScore => "lead_score",
            Column::EstimatedTimeline => "estimated_timeline",
            Column::ObjectionsToAddress => "objections_to_address",
            Column::BudgetIndicator => "budget_indicator",
            Column::DecisionMakerStatus => "decision_maker_status",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.name() == name)
    }

    pub fn kind(self) -> FieldKind {
        use Column::*;
        match self {
            Participated | CompletedFullHunt => FieldKind::Flag,
            CompletionRate | OverallScore | EnthusiasmLevel | LeadScore => FieldKind::Number,
            ChallengeKeywords | CompletedActivities | InterestedFeatures | PainPoints
            | SatisfactionSignals | KeyTalkingPoints | ObjectionsToAddress => FieldKind::List,
            _ => FieldKind::Text,
        }
    }

    /// Human readable header, e.g. `"Lead Score"`.
    pub fn label(self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell, used for filter selections and generic access
// ---------------------------------------------------------------------------

/// A typed cell value. Filter selections live in `BTreeSet`s, so it is `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Flag(bool),
    List(Vec<String>),
    /// A number that failed coercion.
    Missing,
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Flag(_) => 1,
                Number(_) => 2,
                Text(_) => 3,
                List(_) => 4,
            }
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Flag(a), Flag(b)) => a.cmp(b),
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (List(a), List(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Number(v) => v.to_bits().hash(state),
            CellValue::Flag(b) => b.hash(state),
            CellValue::List(items) => items.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{}", format_number(*v)),
            CellValue::Flag(b) => write!(f, "{b}"),
            CellValue::List(items) => write!(f, "{}", items.join(", ")),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Flag(b)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(CellValue::Missing, CellValue::Number)
    }
}

/// Integers print without a fractional part, everything else with up to two decimals.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

// ---------------------------------------------------------------------------
// ContactRecord – one row of the table
// ---------------------------------------------------------------------------

/// One flattened contact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactRecord {
    pub contact_id: String,
    pub full_name: String,
    pub company: String,
    pub role: String,

    pub raw_challenge: String,
    pub challenge_category: String,
    pub challenge_keywords: Vec<String>,
    pub severity_level: String,
    pub impact_area: String,

    pub participated: bool,
    pub completion_rate: Option<f64>,
    pub completed_activities: Vec<String>,
    pub response_speed: String,
    pub completed_full_hunt: bool,

    pub overall_score: Option<f64>,
    pub response_pattern: String,
    pub interested_features: Vec<String>,
    pub conversation_depth: String,
    pub contact_sharing_willingness: String,

    pub overall_sentiment: String,
    pub sentiment_progression: String,
    pub enthusiasm_level: Option<f64>,
    pub pain_points: Vec<String>,
    pub satisfaction_signals: Vec<String>,

    pub company_size_indicator: String,
    pub industry_vertical: String,
    pub tech_adoption_level: String,
    pub competitive_position: String,

    pub recommended_next_step: String,
    pub suggested_content: String,
    pub ideal_follow_up_time: String,
    pub preferred_channel: String,
    pub key_talking_points: Vec<String>,

    pub lead_score: Option<f64>,
    pub estimated_timeline: String,
    pub objections_to_address: Vec<String>,
    pub budget_indicator: String,
    pub decision_maker_status: String,
}

impl ContactRecord {
    /// Borrow a text column. `None` for columns of another kind.
    pub fn text(&self, column: Column) -> Option<&str> {
        use Column::*;
        let s = match column {
            ContactId => &self.contact_id,
            FullName => &self.full_name,
            Company => &self.company,
            Role => &self.role,
            RawChallenge => &self.raw_challenge,
            ChallengeCategory => &self.challenge_category,
            SeverityLevel => &self.severity_level,
            ImpactArea => &self.impact_area,
            ResponseSpeed => &self.response_speed,
            ResponsePattern => &self.response_pattern,
            ConversationDepth => &self.conversation_depth,
            ContactSharingWillingness => &self.contact_sharing_willingness,
            OverallSentiment => &self.overall_sentiment,
            SentimentProgression => &self.sentiment_progression,
            CompanySizeIndicator => &self.company_size_indicator,
            IndustryVertical => &self.industry_vertical,
            TechAdoptionLevel => &self.tech_adoption_level,
            CompetitivePosition => &self.competitive_position,
            RecommendedNextStep => &self.recommended_next_step,
            SuggestedContent => &self.suggested_content,
            IdealFollowUpTime => &self.ideal_follow_up_time,
            PreferredChannel => &self.preferred_channel,
            EstimatedTimeline => &self.estimated_timeline,
            BudgetIndicator => &self.budget_indicator,
            DecisionMakerStatus => &self.decision_maker_status,
            _ => return None,
        };
        Some(s.as_str())
    }

    /// Value of a number column; `None` when missing or not a number column.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::CompletionRate => self.completion_rate,
            Column::OverallScore => self.overall_score,
            Column::EnthusiasmLevel => self.enthusiasm_level,
            Column::LeadScore => self.lead_score,
            _ => None,
        }
    }

    pub fn flag(&self, column: Column) -> Option<bool> {
        match column {
            Column::Participated => Some(self.participated),
            Column::CompletedFullHunt => Some(self.completed_full_hunt),
            _ => None,
        }
    }

    pub fn list(&self, column: Column) -> Option<&[String]> {
        use Column::*;
        let items = match column {
            ChallengeKeywords => &self.challenge_keywords,
            CompletedActivities => &self.completed_activities,
            InterestedFeatures => &self.interested_features,
            PainPoints => &self.pain_points,
            SatisfactionSignals => &self.satisfaction_signals,
            KeyTalkingPoints => &self.key_talking_points,
            ObjectionsToAddress => &self.objections_to_address,
            _ => return None,
        };
        Some(items.as_slice())
    }

    /// Owned, kind-tagged value of any column.
    pub fn cell(&self, column: Column) -> CellValue {
        match column.kind() {
            FieldKind::Text => CellValue::Text(self.text(column).unwrap_or_default().to_string()),
            FieldKind::Number => self.number(column).into(),
            FieldKind::Flag => CellValue::Flag(self.flag(column).unwrap_or_default()),
            FieldKind::List => CellValue::List(self.list(column).unwrap_or_default().to_vec()),
        }
    }

    /// Text rendering of a column, lists joined with `", "`.
    pub fn display(&self, column: Column) -> String {
        self.cell(column).to_string()
    }
}

// ---------------------------------------------------------------------------
// ContactTable – the complete loaded (or filtered) dataset
// ---------------------------------------------------------------------------

/// An ordered collection of contacts with unique non-empty `contact_id`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactTable {
    rows: Vec<ContactRecord>,
}

/// Id given to a record that arrives without one.
pub fn synthetic_id(index: usize) -> String {
    format!("#{index}")
}

impl ContactTable {
    /// Build a table, resolving duplicate ids last-write-wins.
    ///
    /// A later record with an already seen `contact_id` replaces the earlier
    /// row at its original position. A record with an empty id is given
    /// `#<input index>` first, so every row stays addressable by id.
    pub fn from_records(records: Vec<ContactRecord>) -> Self {
        let mut rows: Vec<ContactRecord> = Vec::with_capacity(records.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, mut record) in records.into_iter().enumerate() {
            if record.contact_id.is_empty() {
                record.contact_id = synthetic_id(index);
            }
            match positions.get(&record.contact_id) {
                Some(&pos) => {
                    log::warn!("duplicate contact_id {:?}, keeping the later record", record.contact_id);
                    rows[pos] = record;
                }
                None => {
                    positions.insert(record.contact_id.clone(), rows.len());
                    rows.push(record);
                }
            }
        }
        ContactTable { rows }
    }

    pub fn rows(&self) -> &[ContactRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.rows.iter()
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, contact_id: &str) -> Option<&ContactRecord> {
        self.rows.iter().find(|r| r.contact_id == contact_id)
    }

    /// A copy holding only the rows matching `keep`, order preserved.
    pub fn select<F>(&self, mut keep: F) -> ContactTable
    where
        F: FnMut(&ContactRecord) -> bool,
    {
        ContactTable {
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Sorted distinct values of a column, the option list of a multi-select.
    pub fn unique_values(&self, column: Column) -> BTreeSet<CellValue> {
        self.rows.iter().map(|r| r.cell(column)).collect()
    }

    /// Valid values of a number column.
    pub fn numbers(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |r| r.number(column))
    }
}

impl<'a> IntoIterator for &'a ContactTable {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn contact(id: &str, role: &str) -> ContactRecord {
        ContactRecord {
            contact_id: id.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn every_column_round_trips_through_its_name() {
        for column in Column::ALL {
            assert_eq!(Column::from_name(column.name()), Some(column));
        }
        assert_eq!(Column::from_name("no_such_column"), None);
    }

    #[test]
    fn kind_tags_match_accessors() {
        let record = ContactRecord::default();
        for column in Column::ALL {
            match column.kind() {
                FieldKind::Text => assert!(record.text(column).is_some(), "{column}"),
                FieldKind::Number => assert!(record.flag(column).is_none() && record.text(column).is_none()),
                FieldKind::Flag => assert!(record.flag(column).is_some(), "{column}"),
                FieldKind::List => assert!(record.list(column).is_some(), "{column}"),
            }
        }
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(Column::LeadScore.label(), "Lead Score");
        assert_eq!(Column::ContactId.label(), "Contact Id");
    }

    #[test]
    fn duplicate_ids_keep_later_record_in_first_position() {
        let mut later = contact("a", "CEO");
        later.full_name = "Second".into();
        let table = ContactTable::from_records(vec![
            contact("a", "CTO"),
            contact("b", "CFO"),
            later,
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].role, "CEO");
        assert_eq!(table.rows()[0].full_name, "Second");
        assert_eq!(table.rows()[1].contact_id, "b");
    }

    #[test]
    fn empty_ids_get_distinct_positional_ids() {
        let table = ContactTable::from_records(vec![contact("", "CTO"), contact("a", "CEO"), contact("", "CFO")]);
        let ids: Vec<&str> = table.iter().map(|r| r.contact_id.as_str()).collect();
        assert_eq!(ids, vec!["#0", "a", "#2"]);
        assert_eq!(table.get("#2").map(|r| r.role.as_str()), Some("CFO"));
    }

    #[test]
    fn cell_rendering_joins_lists_and_formats_numbers() {
        let mut record = contact("x", "CTO");
        record.pain_points = vec!["cost".into(), "speed, scale".into()];
        record.lead_score = Some(4.0);
        record.completion_rate = Some(62.5);

        assert_eq!(record.display(Column::PainPoints), "cost, speed, scale");
        assert_eq!(record.display(Column::LeadScore), "4");
        assert_eq!(record.display(Column::CompletionRate), "62.5");
        assert_eq!(record.display(Column::OverallScore), "");
        assert_eq!(record.cell(Column::PainPoints), CellValue::List(record.pain_points.clone()));
    }

    #[test]
    fn unique_values_are_sorted_and_distinct() {
        let table = ContactTable::from_records(vec![
            contact("1", "CTO"),
            contact("2", "CEO"),
            contact("3", "CTO"),
        ]);
        let roles: Vec<CellValue> = table.unique_values(Column::Role).into_iter().collect();
        assert_eq!(roles, vec![CellValue::from("CEO"), CellValue::from("CTO")]);
    }
}
