use async_trait::async_trait;

use crate::city::{City, NewCity, NewPointOfInterest, PointOfInterest};

use super::{PendingChange, Result, StagedInsert};

/// Data-access port used by request handlers.
///
/// Reads always see committed store state. Mutations are staged and only
/// become durable (and visible to any reader) once [`save`](Self::save)
/// returns `true`.
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Returns true iff a city with that id exists.
    async fn city_exists(&self, city_id: i64) -> Result<bool>;

    /// Gets all cities ordered by name, without their points of interest.
    async fn get_cities(&self) -> Result<Vec<City>>;

    /// Gets a city by id. Children are only populated when
    /// `include_points_of_interest` is true.
    async fn get_city(&self, city_id: i64, include_points_of_interest: bool)
        -> Result<Option<City>>;

    /// Gets the points of interest of a city. Empty when the city is absent.
    async fn get_points_of_interest_for_city(&self, city_id: i64) -> Result<Vec<PointOfInterest>>;

    /// Gets one point of interest matching both ids.
    ///
    /// An absent city and an absent point both yield `None`.
    async fn get_point_of_interest_for_city(
        &self,
        city_id: i64,
        point_of_interest_id: i64,
    ) -> Result<Option<PointOfInterest>>;

    /// Stages a new point of interest for a city.
    ///
    /// The caller should check [`city_exists`](Self::city_exists) first; an
    /// insert for a missing city makes the next save fail.
    fn add_point_of_interest_for_city(
        &mut self,
        city_id: i64,
        point: NewPointOfInterest,
    ) -> StagedInsert;

    /// Stages a name/description overwrite of an existing point of interest.
    fn update_point_of_interest(&mut self, point: PointOfInterest);

    /// Stages removal of a point of interest.
    fn delete_point_of_interest(&mut self, point: &PointOfInterest);

    /// Commits every staged change atomically.
    ///
    /// Returns false on failure instead of propagating the error.
    async fn save(&mut self) -> bool;
}

/// Persistence adapter behind the port.
///
/// Implementations issue fresh queries on every read and apply a batch of
/// pending changes as a single atomic commit.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Existence-only check for a city.
    async fn city_exists(&self, city_id: i64) -> Result<bool>;

    /// All cities ordered by name ascending, children not populated.
    async fn list_cities(&self) -> Result<Vec<City>>;

    /// One city, with its children eagerly loaded when requested.
    async fn get_city(&self, city_id: i64, include_points_of_interest: bool)
        -> Result<Option<City>>;

    /// All points of interest with the given city id.
    async fn list_points_of_interest(&self, city_id: i64) -> Result<Vec<PointOfInterest>>;

    /// The point of interest matching both ids.
    async fn get_point_of_interest(
        &self,
        city_id: i64,
        point_of_interest_id: i64,
    ) -> Result<Option<PointOfInterest>>;

    /// Applies all changes atomically, in order.
    ///
    /// Returns the inserted points of interest in the order their inserts
    /// appear in `changes`. On error nothing is applied.
    async fn commit(&self, changes: Vec<PendingChange>) -> Result<Vec<PointOfInterest>>;

    /// Inserts a city directly. Used for seeding.
    async fn insert_city(&self, city: NewCity) -> Result<City>;

    /// Deletes a city and all of its points of interest.
    ///
    /// Returns false when no such city existed.
    async fn delete_city(&self, city_id: i64) -> Result<bool>;
}
