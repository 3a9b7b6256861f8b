//! Recreation usecase

use std::sync::Arc;

use citypass_core::Result;
use citypass_types::{Recreation, RecreationDraft};

use crate::storage::RecreationRepository;

pub struct RecreationUsecase {
    repo: Arc<dyn RecreationRepository>,
}

impl RecreationUsecase {
    pub fn new(repo: Arc<dyn RecreationRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_recreation(&self, draft: RecreationDraft) -> Result<i64> {
        let recreation = Recreation::new(draft);
        self.repo.create(&recreation).await
    }

    pub async fn get_recreation(&self, recreation_id: i64) -> Result<Recreation> {
        self.repo.find_by_id(recreation_id).await
    }

    pub async fn get_all_recreations(&self) -> Result<Vec<Recreation>> {
        self.repo.find_all().await
    }

    pub async fn get_recreations_by_city(&self, city: &str) -> Result<Vec<Recreation>> {
        self.repo.find_by_city(city).await
    }

    /// Existence check first; a not-found error short-circuits before the
    /// store delete is attempted.
    pub async fn delete_recreation(&self, recreation_id: i64) -> Result<()> {
        self.repo.find_by_id(recreation_id).await?;

        self.repo.delete(recreation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fakes::{sample_recreation_draft, CountingRecreationStore};
    use citypass_core::AppError;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn delete_of_missing_recreation_short_circuits() {
        let store = Arc::new(CountingRecreationStore::default());
        let usecase = RecreationUsecase::new(store.clone());

        let err = usecase.delete_recreation(7).await.unwrap_err();
        assert_eq!(err, AppError::RecreationNotExists);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_removes_existing_recreation() {
        let store = Arc::new(CountingRecreationStore::default());
        let usecase = RecreationUsecase::new(store.clone());

        let id = usecase
            .create_recreation(sample_recreation_draft("Jakarta"))
            .await
            .unwrap();

        usecase.delete_recreation(id).await.unwrap();

        let err = usecase.get_recreation(id).await.unwrap_err();
        assert_eq!(err, AppError::RecreationNotExists);
    }
}
