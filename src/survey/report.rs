use std::fmt::{self, Display};

use borda_tally::{Candidate, RankSpace, Ranking};

use crate::survey::{completion::TextCompleter, *};

/// Preferred candidates need strictly more points than this to be summarized.
pub const SHORTLIST_THRESHOLD: u64 = 30;

pub const CANDIDATES_INSTRUCTION: &str = "Summarize the feedback about the following candidates for the role of Director. \
Combine the Qualities and Skills and Examples for each candidate. \
Include the negative feedback given about a candidate, if any. \
For each point, estimate how many respondents corroborate it. \
Produce the output for each candidate in the same format: the name of the candidate, \
then the qualities and skills, then the examples, then the negative feedback. \
Use British English spelling.";

pub const SUGGESTIONS_INSTRUCTION: &str = "Summarize the following suggestions for branch improvements. \
Attempt to find themes where possible and use British English spelling.";

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportSettings {
    pub threshold: u64,
    /// Names that are never put on the shortlist.
    pub excluded: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            threshold: SHORTLIST_THRESHOLD,
            excluded: Vec::new(),
        }
    }
}

/// The complete output of a run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyReport {
    pub rank_space: RankSpace,
    pub shortlist: Vec<Candidate>,
    pub unsuitable: Vec<Candidate>,
    pub candidate_prompt: String,
    pub candidate_summary: String,
    pub suggestion_prompt: String,
    pub suggestion_summary: String,
}

/// The preferred candidates above the threshold, best first, without the excluded names.
pub fn shortlist<'a>(preferred: &'a Ranking, settings: &ReportSettings) -> Vec<&'a Candidate> {
    preferred
        .iter()
        .filter(|c| c.borda_score() > settings.threshold)
        .filter(|c| {
            let excluded = settings.excluded.iter().any(|n| n == c.name());
            if excluded {
                info!("shortlist: {} is excluded", c.name());
            }
            !excluded
        })
        .collect()
}

/// The feedback block of one candidate, with the negative feedback given about the same name.
pub fn candidate_feedback(candidate: &Candidate, unsuitable: &Ranking) -> String {
    let mut block = format!(
        "Candidate: {}: Qualities and Skills: \"{}\" Examples: \"{}\"",
        candidate.name(),
        candidate.reasons().join("\n"),
        candidate.examples().join("\n")
    );
    if let Some(negative) = unsuitable.find(candidate.name()) {
        debug!(
            "candidate_feedback: {} also nominated as unsuitable {} times",
            candidate.name(),
            negative.total_votes()
        );
        block.push_str(&format!(
            " Negative feedback: \"{}\"",
            negative.reasons().join("\n")
        ));
    }
    block
}

/// Cleans up the punctuation left over by the quote removal and the joins.
pub fn normalize_text(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = current
            .replace(". .", ".")
            .replace("  ", " ")
            .replace("..", ".");
        if next == current {
            return current;
        }
        current = next;
    }
}

pub fn candidates_prompt(shortlist: &[&Candidate], unsuitable: &Ranking) -> String {
    let blocks: Vec<String> = shortlist
        .iter()
        .map(|c| candidate_feedback(c, unsuitable))
        .collect();
    format!(
        "{}\n\n{}",
        CANDIDATES_INSTRUCTION,
        normalize_text(&blocks.join("\n\n"))
    )
}

pub fn suggestions_prompt(suggestions: &[String]) -> String {
    format!("{} \"{}\"", SUGGESTIONS_INSTRUCTION, suggestions.join("\n"))
}

/// Builds both requests, sends them one after the other, and gathers the answers.
pub fn compose_report(
    tally: &SurveyTally,
    settings: &ReportSettings,
    completer: &dyn TextCompleter,
) -> BSurveyResult<SurveyReport> {
    let selected = shortlist(&tally.preferred, settings);
    info!(
        "compose_report: {} candidates above {} points",
        selected.len(),
        settings.threshold
    );

    let candidate_prompt = candidates_prompt(&selected, &tally.unsuitable);
    let candidate_summary = completer.complete(&candidate_prompt)?;

    let suggestion_prompt = suggestions_prompt(&tally.suggestions);
    let suggestion_summary = completer.complete(&suggestion_prompt)?;

    Ok(SurveyReport {
        rank_space: RankSpace::PREFERRED,
        shortlist: selected.into_iter().cloned().collect(),
        unsuitable: tally.unsuitable.candidates().to_vec(),
        candidate_prompt,
        candidate_summary,
        suggestion_prompt,
        suggestion_summary,
    })
}

/// `1st`, `2nd`, `3rd`, `4th`, ...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

impl Display for SurveyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self.rank_space.ranks().map(ordinal).collect();
        writeln!(f, "Name\t{}\tBorda Count", headers.join("\t"))?;
        for c in self.shortlist.iter() {
            let counts: Vec<String> = c
                .rank_tally()
                .iter()
                .map(|(_, count)| count.to_string())
                .collect();
            writeln!(f, "{}\t{}\t{}", c.name(), counts.join("\t"), c.borda_score())?;
        }
        writeln!(f)?;

        writeln!(f, "Unsuitable nominations")?;
        for c in self.unsuitable.iter() {
            let counts: Vec<String> = c
                .rank_tally()
                .iter()
                .map(|(rank, count)| format!("{}:{}", rank, count))
                .collect();
            writeln!(
                f,
                "{} {} Borda Count: {}",
                c.name(),
                counts.join(" "),
                c.borda_score()
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.candidate_summary)?;
        writeln!(f)?;
        writeln!(f, "{}", self.suggestion_summary)?;
        writeln!(f)?;

        writeln!(f, "Appendix: candidate summary request")?;
        writeln!(f, "{}", self.candidate_prompt)?;
        writeln!(f)?;
        writeln!(f, "Appendix: suggestion summary request")?;
        writeln!(f, "{}", self.suggestion_prompt)
    }
}
