// ********* Rank spaces ***********

use std::error::Error;
use std::fmt::Display;

/// The set of rank positions a category of nomination can receive.
///
/// Ranks start at 1 (the most preferred) and go up to `max_rank` included.
/// A vote at rank `r` is worth `max_rank + 1 - r` points.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct RankSpace {
    max_rank: u32,
}

impl RankSpace {
    /// The preferred candidates: four ranked columns plus the "5th choice" label.
    pub const PREFERRED: RankSpace = RankSpace { max_rank: 5 };
    /// The candidates nominated as unsuitable: two columns.
    pub const UNSUITABLE: RankSpace = RankSpace { max_rank: 2 };

    pub fn new(max_rank: u32) -> Result<RankSpace, TallyErrors> {
        if max_rank == 0 {
            return Err(TallyErrors::EmptyRankSpace);
        }
        Ok(RankSpace { max_rank })
    }

    pub fn max_rank(&self) -> u32 {
        self.max_rank
    }

    pub fn contains(&self, rank: u32) -> bool {
        (1..=self.max_rank).contains(&rank)
    }

    /// All the ranks, in order of preference.
    pub fn ranks(&self) -> impl Iterator<Item = u32> {
        1..=self.max_rank
    }

    /// The number of points a single vote at this rank is worth.
    ///
    /// Ranks outside of the space are worth nothing.
    pub fn points(&self, rank: u32) -> u64 {
        (self.max_rank + 1).saturating_sub(rank) as u64
    }
}

// ******** Errors *********

/// Errors that prevent a vote from being recorded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    EmptyRankSpace,
    RankOutOfRange { rank: u32, max_rank: u32 },
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::EmptyRankSpace => write!(f, "a rank space needs at least one rank"),
            TallyErrors::RankOutOfRange { rank, max_rank } => {
                write!(f, "rank {} is not between 1 and {}", rank, max_rank)
            }
        }
    }
}
