use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;

use borda_tally::{Ranking, TallyErrors};

pub mod aggregate;
pub mod columns;
pub mod completion;
pub mod io_tsv;
pub mod report;

use crate::survey::aggregate::extract_nominations;
use crate::survey::columns::SurveyLayout;
use crate::survey::completion::{CompletionSettings, OpenAiCompleter, TextCompleter};
use crate::survey::io_tsv::reconstruct_records;
use crate::survey::report::{compose_report, ReportSettings, SurveyReport};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The input file is empty, a header row is expected"))]
    EmptyInput {},
    #[snafu(display("Line {lineno} does not start with a timestamp and there is no response to attach it to"))]
    MissingLeadingTimestamp { lineno: usize },
    #[snafu(display("Response {record}: could not record the vote for {name:?}: {source}"))]
    InvalidRank {
        source: TallyErrors,
        record: usize,
        name: String,
    },
    #[snafu(display("The environment variable OPENAI_API_KEY is not set"))]
    MissingApiKey {},
    #[snafu(display("Could not build the HTTP client: {source}"))]
    HttpClient { source: reqwest::Error },
    #[snafu(display("The completion request to {url} failed: {source}"))]
    CompletionRequest { source: reqwest::Error, url: String },
    #[snafu(display("The completion service returned status {status}: {body}"))]
    CompletionStatus { status: u16, body: String },
    #[snafu(display("Could not read the completion response: {source}"))]
    ParsingCompletion { source: reqwest::Error },
    #[snafu(display("The completion response did not contain any choice"))]
    EmptyCompletion {},
}

pub type BSurveyResult<T> = Result<T, Box<SurveyError>>;

/// Everything that was extracted from the survey responses.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyTally {
    /// The preferred candidates, by decreasing Borda score.
    pub preferred: Ranking,
    /// The candidates nominated as unsuitable, by decreasing Borda score.
    pub unsuitable: Ranking,
    /// The suggestions for the branch, in the order of the responses.
    pub suggestions: Vec<String>,
}

/// Reads a survey export and returns the tallies, without calling any external service.
pub fn read_survey(path: &str, layout: &SurveyLayout) -> BSurveyResult<SurveyTally> {
    info!("Attempting to read survey file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningInputSnafu { path })?;
    let records = reconstruct_records(&contents)?;
    info!("read_survey: {} responses", records.len());
    let tally = extract_nominations(&records, layout)?;
    debug!(
        "read_survey: {} preferred, {} unsuitable, {} suggestions",
        tally.preferred.len(),
        tally.unsuitable.len(),
        tally.suggestions.len()
    );
    Ok(tally)
}

/// Tallies the survey and asks the completer for the two summaries.
pub fn summarize_survey(
    path: &str,
    layout: &SurveyLayout,
    settings: &ReportSettings,
    completer: &dyn TextCompleter,
) -> BSurveyResult<SurveyReport> {
    let tally = read_survey(path, layout)?;
    for c in tally.unsuitable.iter() {
        info!("Unsuitable nomination: {}: {}", c.name(), c.borda_score());
    }
    if tally.preferred.is_empty() {
        warn!("No preferred candidate found in {:?}", path);
    }
    compose_report(&tally, settings, completer)
}

/// Runs the whole survey: tally, summaries, and the report on the standard output.
pub fn run_survey(path: &str) -> BSurveyResult<()> {
    let completion_settings = CompletionSettings::from_env()?;
    info!(
        "run_survey: model {} at {}",
        completion_settings.model, completion_settings.base_url
    );
    let completer = OpenAiCompleter::new(completion_settings)?;
    let report = summarize_survey(
        path,
        &SurveyLayout::DIRECTOR_SELECTION,
        &ReportSettings::default(),
        &completer,
    )?;
    // Printed only once both summaries came back.
    print!("{}", report);
    Ok(())
}
