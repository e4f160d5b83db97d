use trivia_core::leaderboard::RankedScore;
use trivia_core::model::ScoreRecord;

#[must_use]
pub fn avatar_for_gender(gender: &str) -> &'static str {
    match gender {
        "female" => "👩",
        "male" => "👨",
        _ => "🧑",
    }
}

/// One of the top-three podium slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodiumEntryVm {
    pub place: usize,
    pub first_name: String,
    pub avatar: &'static str,
    pub points: u32,
}

#[must_use]
pub fn map_podium(records: &[ScoreRecord]) -> Vec<PodiumEntryVm> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| PodiumEntryVm {
            place: index + 1,
            first_name: record.first_name().to_string(),
            avatar: avatar_for_gender(record.gender()),
            points: record.score(),
        })
        .collect()
}

/// A row below the podium, carrying its overall rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub name: String,
    pub avatar: &'static str,
    pub points: u32,
}

#[must_use]
pub fn map_ranked_rows(entries: &[RankedScore]) -> Vec<LeaderboardRowVm> {
    entries
        .iter()
        .map(|entry| LeaderboardRowVm {
            rank: entry.rank,
            name: entry.record.name().to_string(),
            avatar: avatar_for_gender(entry.record.gender()),
            points: entry.record.score(),
        })
        .collect()
}
