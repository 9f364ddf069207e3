//! In-memory store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cityinfo_core::city::{City, NewCity, PointOfInterest};
use cityinfo_core::storage::{CityStore, PendingChange, RepositoryError, Result};

/// Both tables plus their identity counters.
#[derive(Debug, Clone, Default)]
struct Tables {
    /// City rows. `points_of_interest` is always empty here.
    cities: BTreeMap<i64, City>,
    points_of_interest: BTreeMap<i64, PointOfInterest>,
    last_city_id: i64,
    last_point_of_interest_id: i64,
}

impl Tables {
    fn children_of(&self, city_id: i64) -> Vec<PointOfInterest> {
        self.points_of_interest
            .values()
            .filter(|p| p.city_id == city_id)
            .cloned()
            .collect()
    }

    /// Applies one change. Errors leave `self` partially modified, so callers
    /// work on a copy.
    fn apply(&mut self, change: PendingChange) -> Result<Option<PointOfInterest>> {
        match change {
            PendingChange::InsertPointOfInterest { city_id, point } => {
                if !self.cities.contains_key(&city_id) {
                    return Err(RepositoryError::InvalidData(format!(
                        "Foreign key constraint violation for PointOfInterest: city {city_id} does not exist"
                    )));
                }
                self.last_point_of_interest_id += 1;
                let point = point.into_point_of_interest(self.last_point_of_interest_id, city_id);
                self.points_of_interest.insert(point.id, point.clone());
                Ok(Some(point))
            }
            PendingChange::UpdatePointOfInterest(update) => {
                if let Some(point) = self
                    .points_of_interest
                    .get_mut(&update.id)
                    .filter(|p| p.city_id == update.city_id)
                {
                    point.name = update.name;
                    point.description = update.description;
                }
                Ok(None)
            }
            PendingChange::DeletePointOfInterest { city_id, id } => {
                if self
                    .points_of_interest
                    .get(&id)
                    .is_some_and(|p| p.city_id == city_id)
                {
                    self.points_of_interest.remove(&id);
                }
                Ok(None)
            }
        }
    }
}

/// In-memory storage backend.
///
/// Uses one `RwLock` over both tables so a commit is applied atomically:
/// changes are applied to a copy and swapped in only if all of them succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CityStore for InMemoryStore {
    async fn city_exists(&self, city_id: i64) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.cities.contains_key(&city_id))
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        let tables = self.tables.read().await;
        let mut cities: Vec<City> = tables.cities.values().cloned().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }

    async fn get_city(
        &self,
        city_id: i64,
        include_points_of_interest: bool,
    ) -> Result<Option<City>> {
        let tables = self.tables.read().await;
        Ok(tables.cities.get(&city_id).cloned().map(|mut city| {
            if include_points_of_interest {
                city.points_of_interest = tables.children_of(city_id);
            }
            city
        }))
    }

    async fn list_points_of_interest(&self, city_id: i64) -> Result<Vec<PointOfInterest>> {
        let tables = self.tables.read().await;
        Ok(tables.children_of(city_id))
    }

    async fn get_point_of_interest(
        &self,
        city_id: i64,
        point_of_interest_id: i64,
    ) -> Result<Option<PointOfInterest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .points_of_interest
            .get(&point_of_interest_id)
            .filter(|p| p.city_id == city_id)
            .cloned())
    }

    async fn commit(&self, changes: Vec<PendingChange>) -> Result<Vec<PointOfInterest>> {
        let mut tables = self.tables.write().await;
        let mut working = tables.clone();

        let mut inserted = Vec::new();
        for change in changes {
            if let Some(point) = working.apply(change)? {
                inserted.push(point);
            }
        }

        *tables = working;
        Ok(inserted)
    }

    async fn insert_city(&self, city: NewCity) -> Result<City> {
        let mut tables = self.tables.write().await;
        tables.last_city_id += 1;
        let city = City {
            id: tables.last_city_id,
            name: city.name,
            description: city.description,
            points_of_interest: Vec::new(),
        };
        tables.cities.insert(city.id, city.clone());
        Ok(city)
    }

    async fn delete_city(&self, city_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.cities.remove(&city_id).is_none() {
            return Ok(false);
        }
        tables.points_of_interest.retain(|_, p| p.city_id != city_id);
        Ok(true)
    }
}
