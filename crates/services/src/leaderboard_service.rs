use std::sync::Arc;

use storage::repository::ScoreRepository;
use trivia_core::leaderboard::{RankedScore, rank_from_fourth, rank_top3};
use trivia_core::model::ScoreRecord;

use crate::error::LeaderboardError;

/// Reads stored scores and applies the shared ranking rules. The store lists
/// most-recent-first; ranking wants insertion order so that ties break toward
/// the earlier submission, so the listing is reversed before ranking.
#[derive(Clone)]
pub struct LeaderboardService {
    scores: Arc<dyn ScoreRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self { scores }
    }

    /// Up to three qualifying records, best first.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` on storage failures.
    pub async fn podium(&self) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        Ok(rank_top3(&self.records_in_insertion_order().await?))
    }

    /// Everyone below the podium, annotated with their overall rank.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` on storage failures.
    pub async fn ranked_from_fourth(&self) -> Result<Vec<RankedScore>, LeaderboardError> {
        Ok(rank_from_fourth(&self.records_in_insertion_order().await?))
    }

    async fn records_in_insertion_order(&self) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        let mut rows = self.scores.list_scores().await?;
        rows.reverse();
        Ok(rows.into_iter().map(|row| row.record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use trivia_core::time::fixed_now;

    async fn seeded(scores: &[(&str, u32)]) -> LeaderboardService {
        let repo = InMemoryRepository::new();
        for (name, score) in scores {
            let record = ScoreRecord::new(*name, *score, 10, "female").unwrap();
            repo.append_score(&record, fixed_now()).await.unwrap();
        }
        LeaderboardService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn podium_breaks_ties_toward_earlier_submission() {
        let service = seeded(&[
            ("zero", 0),
            ("first-five", 5),
            ("second-five", 5),
            ("three", 3),
        ])
        .await;

        let podium = service.podium().await.unwrap();
        let names: Vec<&str> = podium.iter().map(ScoreRecord::name).collect();
        assert_eq!(names, vec!["first-five", "second-five", "three"]);

        assert!(service.ranked_from_fourth().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ranks_continue_from_fourth() {
        let service = seeded(&[("a", 9), ("b", 8), ("c", 7), ("d", 6), ("e", 6)]).await;

        let rest = service.ranked_from_fourth().await.unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!((rest[0].rank, rest[0].record.name()), (4, "d"));
        assert_eq!((rest[1].rank, rest[1].record.name()), (5, "e"));
    }

    #[tokio::test]
    async fn empty_store_yields_empty_board() {
        let service = seeded(&[]).await;
        assert!(service.podium().await.unwrap().is_empty());
        assert!(service.ranked_from_fourth().await.unwrap().is_empty());
    }
}
