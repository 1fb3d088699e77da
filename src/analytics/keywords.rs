use super::counts::{FrequencyCounter, Frequencies};
use crate::data::model::{Column, ContactRecord, ContactTable, FieldKind};

/// Number of entries returned by [`extract_keywords`].
pub const TOP_KEYWORDS: usize = 20;

/// Token → count for a list or comma-separated text column, top 20.
pub fn extract_keywords(table: &ContactTable, column: Column) -> Frequencies {
    extract_top_keywords(table, column, TOP_KEYWORDS)
}

/// Like [`extract_keywords`] with an explicit limit.
pub fn extract_top_keywords(table: &ContactTable, column: Column, limit: usize) -> Frequencies {
    let mut counter = FrequencyCounter::new();
    for row in table {
        for token in tokens(row, column) {
            counter.add(token);
        }
    }
    counter.most_common(Some(limit))
}

/// Trimmed, non-empty tokens of one cell. List elements are tokens as they
/// stand; text is split on `,`. Other kinds yield nothing.
pub fn tokens(row: &ContactRecord, column: Column) -> Vec<&str> {
    let pieces: Vec<&str> = match column.kind() {
        FieldKind::List => row
            .list(column)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect(),
        FieldKind::Text => row.text(column).unwrap_or_default().split(',').collect(),
        FieldKind::Number | FieldKind::Flag => Vec::new(),
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::contact;
    use pretty_assertions::assert_eq;

    fn with_keywords(id: &str, keywords: &[&str]) -> ContactRecord {
        let mut r = contact(id, "CTO");
        r.challenge_keywords = keywords.iter().map(|s| s.to_string()).collect();
        r
    }

    #[test]
    fn counts_tokens_across_rows() {
        let table = ContactTable::from_records(vec![
            with_keywords("1", &["cost", "speed"]),
            with_keywords("2", &["cost", "support"]),
        ]);
        let freq = extract_keywords(&table, Column::ChallengeKeywords);
        assert_eq!(
            freq.into_vec(),
            vec![
                ("cost".to_string(), 2),
                ("speed".to_string(), 1),
                ("support".to_string(), 1)
            ]
        );
    }

    #[test]
    fn trims_and_drops_empty_tokens() {
        let table = ContactTable::from_records(vec![with_keywords("1", &["  cost ", "", "   "])]);
        let freq = extract_keywords(&table, Column::ChallengeKeywords);
        assert_eq!(freq.into_vec(), vec![("cost".to_string(), 1)]);
    }

    #[test]
    fn list_elements_with_commas_stay_whole() {
        let table = ContactTable::from_records(vec![with_keywords("1", &["cost, at scale"])]);
        let freq = extract_keywords(&table, Column::ChallengeKeywords);
        assert_eq!(freq.get("cost, at scale"), Some(1));
        assert_eq!(freq.len(), 1);
    }

    #[test]
    fn text_columns_split_on_commas() {
        let mut r = contact("1", "CTO");
        r.raw_challenge = "hiring, churn ,, hiring".into();
        let table = ContactTable::from_records(vec![r]);
        let freq = extract_keywords(&table, Column::RawChallenge);
        assert_eq!(
            freq.into_vec(),
            vec![("hiring".to_string(), 2), ("churn".to_string(), 1)]
        );
    }

    #[test]
    fn never_more_than_twenty_entries() {
        let words: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let table = ContactTable::from_records(vec![with_keywords("1", &refs)]);

        let freq = extract_keywords(&table, Column::ChallengeKeywords);
        assert_eq!(freq.len(), TOP_KEYWORDS);
        assert!(freq.total() <= 30);
        // all counts tie, so first-encountered wins
        assert_eq!(freq.iter().last().map(|(k, _)| k), Some("w19"));
    }

    #[test]
    fn number_columns_contribute_nothing() {
        let table = ContactTable::from_records(vec![contact("1", "CTO")]);
        assert!(extract_keywords(&table, Column::LeadScore).is_empty());
        assert!(extract_keywords(&table, Column::PainPoints).is_empty());
    }
}
