// The position of each answer in a survey response.

/// The columns of one ranked choice: who, why, and an example.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ChoiceColumns {
    pub name: usize,
    pub reason: usize,
    pub example: usize,
}

impl ChoiceColumns {
    pub const fn starting_at(name: usize) -> ChoiceColumns {
        ChoiceColumns {
            name,
            reason: name + 1,
            example: name + 2,
        }
    }
}

/// The columns of one unsuitable nomination: who and why.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DisqualificationColumns {
    pub name: usize,
    pub reason: usize,
}

impl DisqualificationColumns {
    pub const fn starting_at(name: usize) -> DisqualificationColumns {
        DisqualificationColumns {
            name,
            reason: name + 1,
        }
    }
}

/// Where the answers are found in a response. Column indexes start at 0 (the timestamp).
///
/// The order of `choices` and `disqualifications` gives the rank of the vote.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyLayout {
    pub choices: [ChoiceColumns; 4],
    pub disqualifications: [DisqualificationColumns; 2],
    pub suggestion: usize,
}

impl SurveyLayout {
    /// The director selection form, as exported from the responses spreadsheet.
    pub const DIRECTOR_SELECTION: SurveyLayout = SurveyLayout {
        choices: [
            ChoiceColumns::starting_at(1),
            ChoiceColumns::starting_at(4),
            ChoiceColumns::starting_at(7),
            ChoiceColumns::starting_at(10),
        ],
        disqualifications: [
            DisqualificationColumns::starting_at(13),
            DisqualificationColumns::starting_at(15),
        ],
        suggestion: 17,
    };

    /// The number of fields of a response that answers every question.
    pub fn width(&self) -> usize {
        let last_choice = self.choices.iter().map(|c| c.example).max().unwrap_or(0);
        let last_disqualification = self
            .disqualifications
            .iter()
            .map(|d| d.reason)
            .max()
            .unwrap_or(0);
        last_choice.max(last_disqualification).max(self.suggestion) + 1
    }
}
