use std::sync::Arc;

use storage::repository::SessionFlagsRepository;

use crate::error::PlayerServiceError;
use crate::keys;

/// The identity the player typed on the start screen. No authentication is
/// attached to it; it only labels the score record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: String,
    pub gender: String,
}

/// Reads and writes the player-identity session flags.
#[derive(Clone)]
pub struct PlayerService {
    flags: Arc<dyn SessionFlagsRepository>,
}

impl PlayerService {
    #[must_use]
    pub fn new(flags: Arc<dyn SessionFlagsRepository>) -> Self {
        Self { flags }
    }

    /// The registered profile, if a name has been stored.
    ///
    /// # Errors
    ///
    /// Returns `PlayerServiceError` on storage failures.
    pub async fn load(&self) -> Result<Option<PlayerProfile>, PlayerServiceError> {
        let Some(name) = self.flags.get_flag(keys::PLAYER_NAME).await? else {
            return Ok(None);
        };
        let gender = self
            .flags
            .get_flag(keys::PLAYER_GENDER)
            .await?
            .unwrap_or_default();
        Ok(Some(PlayerProfile { name, gender }))
    }

    /// Stores name and gender for the upcoming quiz run.
    ///
    /// # Errors
    ///
    /// Returns `PlayerServiceError::EmptyName` for a blank name and storage
    /// errors otherwise.
    pub async fn register(&self, name: &str, gender: &str) -> Result<(), PlayerServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlayerServiceError::EmptyName);
        }
        self.flags.set_flag(keys::PLAYER_NAME, name).await?;
        self.flags.set_flag(keys::PLAYER_GENDER, gender).await?;
        Ok(())
    }

    /// Forgets the registered identity (leaving the quiz or going home).
    ///
    /// # Errors
    ///
    /// Returns `PlayerServiceError` on storage failures.
    pub async fn clear(&self) -> Result<(), PlayerServiceError> {
        self.flags.remove_flag(keys::PLAYER_NAME).await?;
        self.flags.remove_flag(keys::PLAYER_GENDER).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn service() -> PlayerService {
        PlayerService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn register_then_load_round_trips() {
        let service = service();
        assert!(service.load().await.unwrap().is_none());

        service.register("Ada Lovelace", "female").await.unwrap();
        let profile = service.load().await.unwrap().unwrap();
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.gender, "female");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = service();
        let err = service.register("   ", "male").await.unwrap_err();
        assert!(matches!(err, PlayerServiceError::EmptyName));
        assert!(service.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_identity() {
        let service = service();
        service.register("Ada", "female").await.unwrap();
        service.clear().await.unwrap();
        assert!(service.load().await.unwrap().is_none());
    }
}
