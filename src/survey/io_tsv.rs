// Primitives for reading the tab-separated survey exports.

use regex::Regex;

use crate::survey::*;

pub const FIELD_DELIMITER: char = '\t';

// day/month/year hour:minute:second, then the first tab.
const TIMESTAMP_PATTERN: &str = r"^\d{1,2}/\d{1,2}/\d{1,4} \d{1,2}:\d{1,2}:\d{1,2}\t";

/// Rebuilds one record per survey response from the content of an export.
///
/// The first line is the header and is dropped. A response starts with its
/// timestamp: any line that does not is the continuation of a free-text answer
/// that contained a line break, and gets appended (trimmed, without separator)
/// to the response being read.
pub fn reconstruct_records(contents: &str) -> BSurveyResult<Vec<String>> {
    let timestamp = timestamp_regex();
    let mut lines = contents.lines().enumerate();
    let header = lines.next().context(EmptyInputSnafu {})?;
    debug!("reconstruct_records: header: {:?}", header.1);

    let mut records: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    for (idx, line) in lines {
        let lineno = idx + 1;
        if timestamp.is_match(line.trim_start()) {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(line.trim().to_string());
        } else {
            let continuation = line.trim();
            match current.as_mut() {
                Some(record) => {
                    debug!(
                        "reconstruct_records: line {} continues the response above",
                        lineno
                    );
                    record.push_str(continuation);
                }
                None if continuation.is_empty() => {}
                None => {
                    return Err(Box::new(SurveyError::MissingLeadingTimestamp { lineno }));
                }
            }
        }
    }
    if let Some(record) = current {
        records.push(record);
    }
    if records.is_empty() {
        warn!("reconstruct_records: the export only contains a header");
    }
    Ok(records)
}

/// Splits a record into its fields.
pub fn split_fields(record: &str) -> Vec<&str> {
    record.split(FIELD_DELIMITER).collect()
}

fn timestamp_regex() -> Regex {
    // The pattern is a constant: it always compiles.
    Regex::new(TIMESTAMP_PATTERN).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_dropped() {
        let contents = "Timestamp\tFirst choice\n1/2/2024 10:00:00\tJane Doe\n";
        let records = reconstruct_records(contents).unwrap();
        assert_eq!(records, vec!["1/2/2024 10:00:00\tJane Doe".to_string()]);
    }

    #[test]
    fn continuation_lines_are_joined_without_separator() {
        let contents = "header\n\
            14/03/2024 09:12:45\tJane Doe\tFirst line.  \n\
            \x20 second line.\n\
            third line\tJohn Smith\n\
            14/03/2024 10:00:00\tAlice Brown\n";
        let records = reconstruct_records(contents).unwrap();
        assert_eq!(
            records,
            vec![
                "14/03/2024 09:12:45\tJane Doe\tFirst line.second line.third line\tJohn Smith"
                    .to_string(),
                "14/03/2024 10:00:00\tAlice Brown".to_string(),
            ]
        );
    }

    #[test]
    fn timestamp_fields_may_be_short() {
        let contents = "header\n1/2/24 9:5:7\tA\n01/12/2024 23:59:59\tB\n";
        let records = reconstruct_records(contents).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn timestamp_must_be_followed_by_a_tab() {
        let contents = "header\n1/2/2024 10:00:00\tA\n1/2/2024 10:00:00 B\n";
        let records = reconstruct_records(contents).unwrap();
        assert_eq!(records, vec!["1/2/2024 10:00:00\tA1/2/2024 10:00:00 B".to_string()]);
    }

    #[test]
    fn windows_line_endings() {
        let contents = "header\r\n1/2/2024 10:00:00\tA\r\nmore\r\n";
        let records = reconstruct_records(contents).unwrap();
        assert_eq!(records, vec!["1/2/2024 10:00:00\tAmore".to_string()]);
    }

    #[test]
    fn empty_and_header_only_inputs() {
        assert!(matches!(
            reconstruct_records("").map_err(|e| *e),
            Err(SurveyError::EmptyInput {})
        ));
        assert!(reconstruct_records("header\n").unwrap().is_empty());
        assert!(reconstruct_records("header\n\n  \n").unwrap().is_empty());
    }

    #[test]
    fn continuation_without_a_response_is_an_error() {
        let contents = "header\n\nnot a timestamp\n1/2/2024 10:00:00\tA\n";
        assert!(matches!(
            reconstruct_records(contents).map_err(|e| *e),
            Err(SurveyError::MissingLeadingTimestamp { lineno: 3 })
        ));
    }

    #[test]
    fn fields_are_split_on_tabs() {
        assert_eq!(split_fields("a\t\tb c"), vec!["a", "", "b c"]);
    }
}
