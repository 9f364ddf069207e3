//! Unit of work over a [`CityStore`].
//!
//! Each request builds its own unit of work. Reads pass straight through to
//! the store; mutations are collected as [`PendingChange`]s and handed to the
//! store as one batch on [`save`](CityRepository::save).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::city::{City, NewPointOfInterest, PointOfInterest};

use super::{CityRepository, CityStore, PendingChange, Result, StagedInsert};

/// The production implementation of [`CityRepository`].
pub struct UnitOfWork {
    store: Arc<dyn CityStore>,
    pending: Vec<PendingChange>,
    /// Tokens of the staged inserts, in staging order.
    pending_inserts: Vec<StagedInsert>,
    inserted: HashMap<StagedInsert, PointOfInterest>,
    next_insert: usize,
}

impl UnitOfWork {
    pub fn new(store: Arc<dyn CityStore>) -> Self {
        Self {
            store,
            pending: Vec::new(),
            pending_inserts: Vec::new(),
            inserted: HashMap::new(),
            next_insert: 0,
        }
    }

    /// Whether any change is staged but not yet saved.
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The stored entity for a staged insert, once it has been saved.
    pub fn inserted(&self, staged: StagedInsert) -> Option<&PointOfInterest> {
        self.inserted.get(&staged)
    }
}

#[async_trait]
impl CityRepository for UnitOfWork {
    async fn city_exists(&self, city_id: i64) -> Result<bool> {
        self.store.city_exists(city_id).await
    }

    async fn get_cities(&self) -> Result<Vec<City>> {
        self.store.list_cities().await
    }

    async fn get_city(
        &self,
        city_id: i64,
        include_points_of_interest: bool,
    ) -> Result<Option<City>> {
        self.store.get_city(city_id, include_points_of_interest).await
    }

    async fn get_points_of_interest_for_city(&self, city_id: i64) -> Result<Vec<PointOfInterest>> {
        self.store.list_points_of_interest(city_id).await
    }

    async fn get_point_of_interest_for_city(
        &self,
        city_id: i64,
        point_of_interest_id: i64,
    ) -> Result<Option<PointOfInterest>> {
        self.store.get_point_of_interest(city_id, point_of_interest_id).await
    }

    fn add_point_of_interest_for_city(
        &mut self,
        city_id: i64,
        point: NewPointOfInterest,
    ) -> StagedInsert {
        let staged = StagedInsert(self.next_insert);
        self.next_insert += 1;

        self.pending.push(PendingChange::InsertPointOfInterest { city_id, point });
        self.pending_inserts.push(staged);

        staged
    }

    fn update_point_of_interest(&mut self, point: PointOfInterest) {
        self.pending.push(PendingChange::UpdatePointOfInterest(point));
    }

    fn delete_point_of_interest(&mut self, point: &PointOfInterest) {
        self.pending.push(PendingChange::DeletePointOfInterest {
            city_id: point.city_id,
            id: point.id,
        });
    }

    async fn save(&mut self) -> bool {
        if !self.has_pending_changes() {
            return true;
        }

        let changes = self.pending.clone();
        let count = changes.len();

        match self.store.commit(changes).await {
            Ok(inserted) => {
                for (staged, point) in self.pending_inserts.drain(..).zip(inserted) {
                    self.inserted.insert(staged, point);
                }
                self.pending.clear();
                tracing::debug!(changes = count, "Saved unit of work");
                true
            }
            Err(err) => {
                tracing::error!(error = %err, changes = count, "Failed to save unit of work");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::city::NewCity;
    use crate::storage::RepositoryError;

    /// Minimal store that applies commits to a vector of points.
    #[derive(Default)]
    struct TestStore {
        cities: Mutex<Vec<City>>,
        points: Mutex<Vec<PointOfInterest>>,
        next_id: AtomicUsize,
        commits: AtomicUsize,
        fail_commits: AtomicBool,
    }

    impl TestStore {
        fn with_city(id: i64, name: &str) -> Self {
            let store = Self::default();
            store.cities.lock().unwrap().push(City {
                id,
                name: name.to_string(),
                description: None,
                points_of_interest: Vec::new(),
            });
            store
        }
    }

    #[async_trait]
    impl CityStore for TestStore {
        async fn city_exists(&self, city_id: i64) -> Result<bool> {
            Ok(self.cities.lock().unwrap().iter().any(|c| c.id == city_id))
        }

        async fn list_cities(&self) -> Result<Vec<City>> {
            Ok(self.cities.lock().unwrap().clone())
        }

        async fn get_city(&self, city_id: i64, include: bool) -> Result<Option<City>> {
            let city = self
                .cities
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == city_id)
                .cloned();
            Ok(city.map(|mut city| {
                if include {
                    city.points_of_interest = self
                        .points
                        .lock()
                        .unwrap()
                        .iter()
                        .filter(|p| p.city_id == city_id)
                        .cloned()
                        .collect();
                }
                city
            }))
        }

        async fn list_points_of_interest(&self, city_id: i64) -> Result<Vec<PointOfInterest>> {
            Ok(self
                .points
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.city_id == city_id)
                .cloned()
                .collect())
        }

        async fn get_point_of_interest(
            &self,
            city_id: i64,
            id: i64,
        ) -> Result<Option<PointOfInterest>> {
            Ok(self
                .points
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.city_id == city_id && p.id == id)
                .cloned())
        }

        async fn commit(&self, changes: Vec<PendingChange>) -> Result<Vec<PointOfInterest>> {
            if self.fail_commits.load(Ordering::SeqCst) {
                return Err(RepositoryError::QueryFailed("disk full".to_string()));
            }
            self.commits.fetch_add(1, Ordering::SeqCst);

            let mut points = self.points.lock().unwrap();
            let mut inserted = Vec::new();
            for change in changes {
                match change {
                    PendingChange::InsertPointOfInterest { city_id, point } => {
                        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
                        let point = point.into_point_of_interest(id, city_id);
                        points.push(point.clone());
                        inserted.push(point);
                    }
                    PendingChange::UpdatePointOfInterest(update) => {
                        if let Some(point) = points
                            .iter_mut()
                            .find(|p| p.id == update.id && p.city_id == update.city_id)
                        {
                            point.name = update.name;
                            point.description = update.description;
                        }
                    }
                    PendingChange::DeletePointOfInterest { city_id, id } => {
                        points.retain(|p| !(p.id == id && p.city_id == city_id));
                    }
                }
            }
            Ok(inserted)
        }

        async fn insert_city(&self, _city: NewCity) -> Result<City> {
            unimplemented!("not used by these tests")
        }

        async fn delete_city(&self, _city_id: i64) -> Result<bool> {
            unimplemented!("not used by these tests")
        }
    }

    #[tokio::test]
    async fn test_add_is_staged_until_save() {
        let store = Arc::new(TestStore::with_city(1, "Paris"));
        let mut uow = UnitOfWork::new(store.clone());

        let staged =
            uow.add_point_of_interest_for_city(1, NewPointOfInterest::new("Eiffel Tower"));

        assert!(uow.has_pending_changes());
        assert!(uow.get_points_of_interest_for_city(1).await.unwrap().is_empty());
        assert!(uow.inserted(staged).is_none());

        assert!(uow.save().await);

        let point = uow.inserted(staged).unwrap().clone();
        assert_eq!(point.city_id, 1);
        assert_eq!(point.name, "Eiffel Tower");
        assert_eq!(
            uow.get_point_of_interest_for_city(1, point.id).await.unwrap(),
            Some(point)
        );
        assert!(!uow.has_pending_changes());
    }

    #[tokio::test]
    async fn test_staged_changes_are_invisible_to_other_units() {
        let store: Arc<dyn CityStore> = Arc::new(TestStore::with_city(1, "Paris"));
        let mut writer = UnitOfWork::new(store.clone());
        let reader = UnitOfWork::new(store);

        writer.add_point_of_interest_for_city(1, NewPointOfInterest::new("Louvre"));
        let before = reader.get_city(1, true).await.unwrap().unwrap();
        assert!(before.points_of_interest.is_empty());

        assert!(writer.save().await);
        let after = reader.get_city(1, true).await.unwrap().unwrap();
        assert_eq!(after.points_of_interest.len(), 1);
    }

    #[tokio::test]
    async fn test_save_without_changes_does_not_write() {
        let store = Arc::new(TestStore::with_city(1, "Paris"));
        let mut uow = UnitOfWork::new(store.clone());

        uow.add_point_of_interest_for_city(1, NewPointOfInterest::new("Louvre"));
        assert!(uow.save().await);
        assert!(uow.save().await);
        assert!(uow.save().await);

        assert_eq!(store.commits.load(Ordering::SeqCst), 1);
        assert_eq!(store.points.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_returns_false_and_keeps_changes() {
        let store = Arc::new(TestStore::with_city(1, "Paris"));
        store.fail_commits.store(true, Ordering::SeqCst);
        let mut uow = UnitOfWork::new(store.clone());

        let staged = uow.add_point_of_interest_for_city(1, NewPointOfInterest::new("Louvre"));

        assert!(!uow.save().await);
        assert!(uow.has_pending_changes());
        assert!(uow.inserted(staged).is_none());

        store.fail_commits.store(false, Ordering::SeqCst);
        assert!(uow.save().await);
        assert!(uow.inserted(staged).is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete_are_staged_in_order() {
        let store = Arc::new(TestStore::with_city(1, "Paris"));
        let mut uow = UnitOfWork::new(store.clone());
        let first = uow.add_point_of_interest_for_city(1, NewPointOfInterest::new("Louvre"));
        let second = uow.add_point_of_interest_for_city(1, NewPointOfInterest::new("Orsay"));
        assert!(uow.save().await);

        let mut louvre = uow.inserted(first).unwrap().clone();
        let orsay = uow.inserted(second).unwrap().clone();
        louvre.name = "Musée du Louvre".to_string();

        uow.update_point_of_interest(louvre.clone());
        uow.delete_point_of_interest(&orsay);
        assert!(uow.has_pending_changes());

        assert!(uow.save().await);

        let remaining = uow.get_points_of_interest_for_city(1).await.unwrap();
        assert_eq!(remaining, vec![louvre]);
    }
}
