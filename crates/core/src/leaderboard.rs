//! Pure ranking over stored score records.
//!
//! Both functions apply the same ordering: drop non-positive scores, then a
//! stable sort by score descending, so records with equal scores keep the
//! order of the input slice. Callers pass records in insertion order, which
//! makes insertion order the documented tie-break. Inputs are never mutated;
//! outputs are freshly owned.

use std::cmp::Reverse;

use crate::model::ScoreRecord;

/// A score record annotated with its 1-based leaderboard rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScore {
    pub rank: usize,
    pub record: ScoreRecord,
}

fn qualifying_sorted(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    let mut qualifying: Vec<ScoreRecord> = records
        .iter()
        .filter(|record| record.score() > 0)
        .cloned()
        .collect();
    qualifying.sort_by_key(|record| Reverse(record.score()));
    qualifying
}

/// The podium: up to three qualifying records, best first.
#[must_use]
pub fn rank_top3(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    let mut ranked = qualifying_sorted(records);
    ranked.truncate(3);
    ranked
}

/// Everyone below the podium, annotated with their overall rank (so the
/// first returned entry, when any, is rank 4).
#[must_use]
pub fn rank_from_fourth(records: &[ScoreRecord]) -> Vec<RankedScore> {
    qualifying_sorted(records)
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedScore {
            rank: index + 1,
            record,
        })
        .skip(3)
        .collect()
}
