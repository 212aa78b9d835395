use borda_tally::builder::Builder;
use borda_tally::RankSpace;

use crate::survey::{
    columns::SurveyLayout,
    io_tsv::split_fields,
    *,
};

/// The label some respondents used to name a 5th choice in one of the four choice columns.
pub const FIFTH_CHOICE_LABEL: &str = "5th choice";
const FIFTH_CHOICE_RANK: u32 = 5;

/// Walks the responses and tallies the preferred candidates, the unsuitable
/// nominations and the suggestions.
pub fn extract_nominations(records: &[String], layout: &SurveyLayout) -> BSurveyResult<SurveyTally> {
    let mut preferred = Builder::new(RankSpace::PREFERRED);
    let mut unsuitable = Builder::new(RankSpace::UNSUITABLE);
    let mut suggestions: Vec<String> = Vec::new();

    for (record_idx, record) in records.iter().enumerate() {
        let fields = split_fields(record);
        if fields.len() < layout.width() {
            debug!(
                "extract_nominations: response {}: {} fields out of {}, the missing ones are blank",
                record_idx,
                fields.len(),
                layout.width()
            );
        }

        for (idx, cols) in layout.choices.iter().enumerate() {
            let raw_name = field(&fields, cols.name).trim();
            if raw_name.is_empty() {
                continue;
            }
            let (name, rank) = parse_choice_name(raw_name, (idx + 1) as u32);
            debug!(
                "extract_nominations: response {}: {:?} at rank {}",
                record_idx, name, rank
            );
            preferred
                .add_vote(
                    &name,
                    rank,
                    &sanitize(field(&fields, cols.reason)),
                    &sanitize(field(&fields, cols.example)),
                )
                .context(InvalidRankSnafu {
                    record: record_idx,
                    name: name.clone(),
                })?;
        }

        for (idx, cols) in layout.disqualifications.iter().enumerate() {
            let name = field(&fields, cols.name).trim();
            if name.is_empty() || name.to_lowercase() == "none" {
                continue;
            }
            let rank = (idx + 1) as u32;
            debug!(
                "extract_nominations: response {}: unsuitable {:?} at rank {}",
                record_idx, name, rank
            );
            unsuitable
                .add_vote(name, rank, &sanitize(field(&fields, cols.reason)), "")
                .context(InvalidRankSnafu {
                    record: record_idx,
                    name,
                })?;
        }

        let suggestion = sanitize(field(&fields, layout.suggestion));
        if !suggestion.is_empty() {
            suggestions.push(suggestion);
        }
    }

    Ok(SurveyTally {
        preferred: preferred.build(),
        unsuitable: unsuitable.build(),
        suggestions,
    })
}

/// Reads the candidate name of a choice column, and the rank of the vote.
///
/// A name written as `5th choice ... Firstname Lastname` is a 5th choice for the
/// last two words, whatever the column.
pub fn parse_choice_name(raw_name: &str, column_rank: u32) -> (String, u32) {
    if raw_name.starts_with(FIFTH_CHOICE_LABEL) {
        let words: Vec<&str> = raw_name.split_whitespace().collect();
        let name = words[words.len().saturating_sub(2)..].join(" ");
        (name, FIFTH_CHOICE_RANK)
    } else {
        (raw_name.to_string(), column_rank)
    }
}

/// Removes the double quotes, they would break the quoting of the summary requests.
pub fn sanitize(text: &str) -> String {
    text.replace('"', "").trim().to_string()
}

fn field<'a>(fields: &[&'a str], idx: usize) -> &'a str {
    fields.get(idx).cloned().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[(usize, &str)]) -> String {
        let mut fields = vec![String::new(); 18];
        fields[0] = "14/03/2024 09:12:45".to_string();
        for (idx, v) in cells {
            fields[*idx] = v.to_string();
        }
        fields.join("\t")
    }

    #[test]
    fn fifth_choice_label() {
        assert_eq!(
            parse_choice_name("5th choice ... John Smith", 2),
            ("John Smith".to_string(), 5)
        );
        assert_eq!(
            parse_choice_name("5th choice (optional):   Jane  Doe", 4),
            ("Jane Doe".to_string(), 5)
        );
        assert_eq!(
            parse_choice_name("John Smith", 3),
            ("John Smith".to_string(), 3)
        );
    }

    #[test]
    fn sanitize_removes_every_double_quote() {
        assert_eq!(sanitize("He said \"yes\" twice\"\""), "He said yes twice");
        assert_eq!(sanitize("  \"  "), "");
        for text in ["\"", "a\"b\"c", "no quotes", "\"\"\"x\"\"\""] {
            assert!(!sanitize(text).contains('"'));
        }
    }

    #[test]
    fn choices_are_ranked_by_column() {
        let records = vec![record(&[
            (1, "Jane Doe"),
            (2, "Kind"),
            (3, "Ran the \"open day\""),
            (4, "John Smith"),
            (7, "Alice Brown"),
            (10, "Bob Ray"),
        ])];
        let tally = extract_nominations(&records, &SurveyLayout::DIRECTOR_SELECTION).unwrap();
        let scores: Vec<(&str, u64)> = tally
            .preferred
            .iter()
            .map(|c| (c.name(), c.borda_score()))
            .collect();
        assert_eq!(
            scores,
            vec![
                ("Jane Doe", 5),
                ("John Smith", 4),
                ("Alice Brown", 3),
                ("Bob Ray", 2)
            ]
        );
        let jane = tally.preferred.find("Jane Doe").unwrap();
        assert_eq!(jane.reasons(), &["Kind"]);
        assert_eq!(jane.examples(), &["Ran the open day"]);
        // Blank reasons are not kept.
        assert!(tally.preferred.find("Bob Ray").unwrap().reasons().is_empty());
    }

    #[test]
    fn fifth_choice_in_any_column() {
        let records = vec![
            record(&[(10, "5th choice - John Smith")]),
            record(&[(1, "5th choice - John Smith")]),
        ];
        let tally = extract_nominations(&records, &SurveyLayout::DIRECTOR_SELECTION).unwrap();
        let john = tally.preferred.find("John Smith").unwrap();
        assert_eq!(john.votes_at(5), 2);
        assert_eq!(john.borda_score(), 2);
        assert_eq!(tally.preferred.len(), 1);
    }

    #[test]
    fn none_and_blank_disqualifications_are_ignored() {
        let records = vec![
            record(&[(13, "None"), (14, "nothing to add"), (15, "  ")]),
            record(&[(13, "NONE"), (15, "none")]),
            record(&[(13, "Dave Green"), (14, "Too \"new\""), (15, "nOnE")]),
        ];
        let tally = extract_nominations(&records, &SurveyLayout::DIRECTOR_SELECTION).unwrap();
        assert_eq!(tally.unsuitable.len(), 1);
        let dave = tally.unsuitable.find("Dave Green").unwrap();
        assert_eq!(dave.rank_tally(), vec![(1, 1), (2, 0)]);
        assert_eq!(dave.borda_score(), 2);
        assert_eq!(dave.reasons(), &["Too new"]);
        assert!(dave.examples().is_empty());
    }

    #[test]
    fn suggestions_keep_response_order() {
        let records = vec![
            record(&[(17, "More evenings")]),
            record(&[(17, "   ")]),
            record(&[(17, "More evenings")]),
            "14/03/2024 09:12:45\tJane Doe".to_string(),
        ];
        let tally = extract_nominations(&records, &SurveyLayout::DIRECTOR_SELECTION).unwrap();
        assert_eq!(
            tally.suggestions,
            vec!["More evenings".to_string(), "More evenings".to_string()]
        );
        // The short response still counts.
        assert_eq!(tally.preferred.find("Jane Doe").unwrap().borda_score(), 5);
    }

    #[test]
    fn names_are_trimmed() {
        let records = vec![
            record(&[(1, "  Jane Doe ")]),
            record(&[(4, "Jane Doe")]),
        ];
        let tally = extract_nominations(&records, &SurveyLayout::DIRECTOR_SELECTION).unwrap();
        assert_eq!(tally.preferred.len(), 1);
        assert_eq!(tally.preferred.find("Jane Doe").unwrap().borda_score(), 9);
    }
}
