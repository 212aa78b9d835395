use clap::Parser;

/// Tabulates the director selection survey and summarizes the feedback.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The responses of the survey, exported from the spreadsheet as tab-separated values.
    /// The first row must be the header. The completion service is configured with the
    /// OPENAI_API_KEY, OPENAI_BASE_URL and OPENAI_MODEL environment variables.
    #[clap(value_parser)]
    pub input: String,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_positional_path() {
        let args = Args::try_parse_from(["director-survey", "responses.tsv"]).unwrap();
        assert_eq!(args.input, "responses.tsv");
        assert!(!args.verbose);
    }

    #[test]
    fn verbose_flag() {
        let args =
            Args::try_parse_from(["director-survey", "--verbose", "responses.tsv"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn path_is_required() {
        assert!(Args::try_parse_from(["director-survey"]).is_err());
    }
}
