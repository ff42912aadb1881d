//! In-memory credits reader for testing and local development.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{EditionId, UserId};
use crate::ports::{CreditsError, CreditsReader};

/// Credits reader backed by a map. Unknown pairs have zero purchases.
#[derive(Debug, Default)]
pub struct MockCreditsReader {
    purchases: RwLock<HashMap<(UserId, EditionId), u32>>,
    force_error: RwLock<Option<CreditsError>>,
}

impl MockCreditsReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `user_id` already bought `chapters` in `edition_id`.
    pub fn with_purchases(self, user_id: &UserId, edition_id: &EditionId, chapters: u32) -> Self {
        self.set_purchases(user_id, edition_id, chapters);
        self
    }

    pub fn set_purchases(&self, user_id: &UserId, edition_id: &EditionId, chapters: u32) {
        self.write_purchases()
            .insert((user_id.clone(), edition_id.clone()), chapters);
    }

    /// Forces every lookup to fail with `error`.
    pub fn with_error(self, error: CreditsError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    fn read_purchases(&self) -> RwLockReadGuard<'_, HashMap<(UserId, EditionId), u32>> {
        self.purchases.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_purchases(&self) -> RwLockWriteGuard<'_, HashMap<(UserId, EditionId), u32>> {
        self.purchases.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CreditsReader for MockCreditsReader {
    async fn chapters_purchased(
        &self,
        user_id: &UserId,
        edition_id: &EditionId,
    ) -> Result<u32, CreditsError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        Ok(self
            .read_purchases()
            .get(&(user_id.clone(), edition_id.clone()))
            .copied()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (UserId, EditionId) {
        (UserId::new("author-1").unwrap(), EditionId::new("12").unwrap())
    }

    #[tokio::test]
    async fn unknown_pair_has_no_purchases() {
        let (user, edition) = ids();
        let reader = MockCreditsReader::new();
        assert_eq!(reader.chapters_purchased(&user, &edition).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn returns_configured_purchases() {
        let (user, edition) = ids();
        let reader = MockCreditsReader::new().with_purchases(&user, &edition, 3);
        assert_eq!(reader.chapters_purchased(&user, &edition).await.unwrap(), 3);

        let other = EditionId::new("13").unwrap();
        assert_eq!(reader.chapters_purchased(&user, &other).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn forced_error_is_returned() {
        let (user, edition) = ids();
        let reader = MockCreditsReader::new().with_error(CreditsError::unavailable("down"));
        assert_eq!(
            reader.chapters_purchased(&user, &edition).await.unwrap_err(),
            CreditsError::unavailable("down")
        );
    }
}
