//! Restaurant usecase

use std::sync::Arc;

use citypass_core::Result;
use citypass_types::{Restaurant, RestaurantDraft};

use crate::storage::RestaurantRepository;

pub struct RestaurantUsecase {
    repo: Arc<dyn RestaurantRepository>,
}

impl RestaurantUsecase {
    pub fn new(repo: Arc<dyn RestaurantRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_restaurant(&self, draft: RestaurantDraft) -> Result<i64> {
        let restaurant = Restaurant::new(draft);
        self.repo.create(&restaurant).await
    }

    pub async fn get_restaurant(&self, restaurant_id: i64) -> Result<Restaurant> {
        self.repo.find_by_id(restaurant_id).await
    }

    pub async fn get_all_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.repo.find_all().await
    }

    pub async fn get_restaurants_by_city(&self, city: &str) -> Result<Vec<Restaurant>> {
        self.repo.find_by_city(city).await
    }

    /// Existence check first; a not-found error short-circuits before the
    /// store delete is attempted.
    pub async fn delete_restaurant(&self, restaurant_id: i64) -> Result<()> {
        self.repo.find_by_id(restaurant_id).await?;

        self.repo.delete(restaurant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fakes::{sample_restaurant_draft, CountingRestaurantStore};
    use citypass_core::AppError;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn delete_of_missing_restaurant_short_circuits() {
        let store = Arc::new(CountingRestaurantStore::default());
        let usecase = RestaurantUsecase::new(store.clone());

        let err = usecase.delete_restaurant(7).await.unwrap_err();
        assert_eq!(err, AppError::RestaurantNotExists);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_removes_existing_restaurant() {
        let store = Arc::new(CountingRestaurantStore::default());
        let usecase = RestaurantUsecase::new(store.clone());

        let id = usecase
            .create_restaurant(sample_restaurant_draft("Bandung"))
            .await
            .unwrap();

        usecase.delete_restaurant(id).await.unwrap();

        let err = usecase.get_restaurant(id).await.unwrap_err();
        assert_eq!(err, AppError::RestaurantNotExists);
    }
}
