/*!
Borda-count tallies for ranked nominations.

Each [`Candidate`] keeps how many votes it received at every rank of its
[`RankSpace`], together with the free-text justifications that came with
those votes. The Borda score is always derived from the tally.

```
use borda_tally::builder::Builder;
use borda_tally::RankSpace;
# use borda_tally::TallyErrors;

let mut builder = Builder::new(RankSpace::PREFERRED);
builder.add_vote("Jane Doe", 1, "Calm under pressure", "")?;
builder.add_vote("Jane Doe", 2, "", "Ran the rota for a year")?;

let ranking = builder.build();
let jane = ranking.find("Jane Doe").unwrap();
assert_eq!(jane.borda_score(), 9);
# Ok::<(), TallyErrors>(())
```
*/

pub mod builder;
mod config;
pub mod manual;

use log::debug;
use std::collections::BTreeMap;

pub use crate::config::*;

/// A named candidate and everything that was said about them.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    name: String,
    space: RankSpace,
    rank_tally: BTreeMap<u32, u64>,
    reasons: Vec<String>,
    examples: Vec<String>,
}

impl Candidate {
    /// A candidate with no votes yet. Every rank of the space starts at zero.
    pub fn new(name: &str, space: RankSpace) -> Candidate {
        Candidate {
            name: name.to_string(),
            space,
            rank_tally: space.ranks().map(|rank| (rank, 0)).collect(),
            reasons: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank_space(&self) -> RankSpace {
        self.space
    }

    /// Records one vote at the given rank.
    ///
    /// Empty reasons and examples are not kept. The text is stored as given:
    /// sanitizing it is the job of the caller.
    pub fn record_vote(&mut self, rank: u32, reason: &str, example: &str) -> Result<(), TallyErrors> {
        if !self.space.contains(rank) {
            return Err(TallyErrors::RankOutOfRange {
                rank,
                max_rank: self.space.max_rank(),
            });
        }
        *self.rank_tally.entry(rank).or_insert(0) += 1;
        if !reason.is_empty() {
            self.reasons.push(reason.to_string());
        }
        if !example.is_empty() {
            self.examples.push(example.to_string());
        }
        debug!(
            "record_vote: {} rank {} -> score {}",
            self.name,
            rank,
            self.borda_score()
        );
        Ok(())
    }

    /// The number of votes received at this rank (zero when the rank was never seen).
    pub fn votes_at(&self, rank: u32) -> u64 {
        self.rank_tally.get(&rank).cloned().unwrap_or(0)
    }

    /// The votes per rank, in rank order.
    pub fn rank_tally(&self) -> Vec<(u32, u64)> {
        self.rank_tally.iter().map(|(r, c)| (*r, *c)).collect()
    }

    pub fn total_votes(&self) -> u64 {
        self.rank_tally.values().sum()
    }

    pub fn borda_score(&self) -> u64 {
        self.rank_tally
            .iter()
            .map(|(rank, count)| count * self.space.points(*rank))
            .sum()
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}

/// Candidates ordered from the highest to the lowest Borda score.
///
/// Candidates with the same score keep the order in which they were first seen.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ranking {
    candidates: Vec<Candidate>,
}

impl Ranking {
    pub(crate) fn from_insertion_order(mut candidates: Vec<Candidate>) -> Ranking {
        // The sort is stable: ties stay in insertion order.
        candidates.sort_by(|a, b| b.borda_score().cmp(&a.borda_score()));
        Ranking { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn find(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
