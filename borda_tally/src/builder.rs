use std::collections::HashMap;

use log::debug;

pub use crate::config::*;
use crate::{Candidate, Ranking};

/// A builder for collecting the votes of one category of nomination.
///
/// Candidates are created the first time their name is seen, and are kept
/// in that order until [`Builder::build`] sorts them by score.
///
/// ```
/// use borda_tally::builder::Builder;
/// use borda_tally::RankSpace;
/// # use borda_tally::TallyErrors;
///
/// let mut builder = Builder::new(RankSpace::UNSUITABLE);
/// builder.add_vote("Bob", 2, "Not enough time", "")?;
/// builder.add_vote("Anna", 1, "", "")?;
///
/// let ranking = builder.build();
/// assert_eq!(ranking.candidates()[0].name(), "Anna");
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct Builder {
    pub(crate) _space: RankSpace,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _index: HashMap<String, usize>,
}

impl Builder {
    pub fn new(space: RankSpace) -> Builder {
        Builder {
            _space: space,
            _candidates: Vec::new(),
            _index: HashMap::new(),
        }
    }

    pub fn rank_space(&self) -> RankSpace {
        self._space
    }

    /// Adds one vote for the candidate with this name, creating the candidate if needed.
    pub fn add_vote(
        &mut self,
        name: &str,
        rank: u32,
        reason: &str,
        example: &str,
    ) -> Result<(), TallyErrors> {
        if !self._space.contains(rank) {
            return Err(TallyErrors::RankOutOfRange {
                rank,
                max_rank: self._space.max_rank(),
            });
        }
        let candidate = self.get_or_insert(name);
        candidate.record_vote(rank, reason, example)
    }

    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self._index.get(name).map(|idx| &self._candidates[*idx])
    }

    pub fn len(&self) -> usize {
        self._candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self._candidates.is_empty()
    }

    /// The candidates sorted by decreasing score.
    pub fn build(self) -> Ranking {
        debug!("build: {} candidates", self._candidates.len());
        Ranking::from_insertion_order(self._candidates)
    }

    fn get_or_insert(&mut self, name: &str) -> &mut Candidate {
        let idx = match self._index.get(name) {
            Some(idx) => *idx,
            None => {
                debug!("get_or_insert: new candidate {:?}", name);
                self._candidates.push(Candidate::new(name, self._space));
                let idx = self._candidates.len() - 1;
                self._index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self._candidates[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_accumulates_on_one_candidate() {
        let mut builder = Builder::new(RankSpace::PREFERRED);
        builder.add_vote("Jane Doe", 1, "kind", "").unwrap();
        builder.add_vote("John Smith", 2, "", "").unwrap();
        builder.add_vote("Jane Doe", 2, "patient", "ex").unwrap();
        assert_eq!(builder.len(), 2);
        let jane = builder.get("Jane Doe").unwrap();
        assert_eq!(jane.total_votes(), 2);
        assert_eq!(jane.reasons(), &["kind", "patient"]);
        assert_eq!(jane.examples(), &["ex"]);
        assert!(builder.get("Nobody").is_none());
    }

    #[test]
    fn out_of_range_vote_creates_no_candidate() {
        let mut builder = Builder::new(RankSpace::UNSUITABLE);
        assert!(builder.add_vote("Anna", 3, "", "").is_err());
        assert!(builder.get("Anna").is_none());
        assert!(builder.is_empty());
    }
}
