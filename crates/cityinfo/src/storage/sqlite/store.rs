//! SQLite store implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use cityinfo_core::city::{City, NewCity, PointOfInterest};
use cityinfo_core::storage::{CityStore, PendingChange, RepositoryError, Result};

use super::conversions::{
    collect_city, row_to_city, row_to_city_with_point_of_interest, row_to_point_of_interest,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based store.
///
/// All queries run on the single connection thread owned by `tokio-rusqlite`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new store with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[allow(dead_code)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

/// Applies one pending change inside an open transaction.
fn apply_change(
    tx: &rusqlite::Transaction<'_>,
    change: PendingChange,
) -> rusqlite::Result<Option<PointOfInterest>> {
    match change {
        PendingChange::InsertPointOfInterest { city_id, point } => {
            tx.execute(
                schema::INSERT_POINT_OF_INTEREST,
                rusqlite::params![city_id, point.name, point.description],
            )?;
            let id = tx.last_insert_rowid();
            Ok(Some(point.into_point_of_interest(id, city_id)))
        }
        PendingChange::UpdatePointOfInterest(point) => {
            tx.execute(
                schema::UPDATE_POINT_OF_INTEREST,
                rusqlite::params![point.city_id, point.id, point.name, point.description],
            )?;
            Ok(None)
        }
        PendingChange::DeletePointOfInterest { city_id, id } => {
            tx.execute(
                schema::DELETE_POINT_OF_INTEREST,
                rusqlite::params![city_id, id],
            )?;
            Ok(None)
        }
    }
}

#[async_trait]
impl CityStore for SqliteStore {
    async fn city_exists(&self, city_id: i64) -> Result<bool> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::CITY_EXISTS, [city_id], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "City"))
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_CITIES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_city).map_err(wrap_err)?;

                let mut cities = Vec::new();
                for row_result in rows {
                    cities.push(row_result.map_err(wrap_err)?);
                }
                Ok(cities)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "City"))
    }

    async fn get_city(
        &self,
        city_id: i64,
        include_points_of_interest: bool,
    ) -> Result<Option<City>> {
        self.conn
            .call(move |conn| {
                if !include_points_of_interest {
                    let mut stmt = conn.prepare(schema::SELECT_CITY_BY_ID).map_err(wrap_err)?;
                    return match stmt.query_row([city_id], row_to_city) {
                        Ok(city) => Ok(Some(city)),
                        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                        Err(e) => Err(wrap_err(e)),
                    };
                }

                let mut stmt = conn
                    .prepare(schema::SELECT_CITY_WITH_POINTS_OF_INTEREST)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([city_id], row_to_city_with_point_of_interest)
                    .map_err(wrap_err)?;

                let mut joined = Vec::new();
                for row_result in rows {
                    joined.push(row_result.map_err(wrap_err)?);
                }
                Ok(collect_city(joined))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "City"))
    }

    async fn list_points_of_interest(&self, city_id: i64) -> Result<Vec<PointOfInterest>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_POINTS_OF_INTEREST_BY_CITY)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([city_id], row_to_point_of_interest)
                    .map_err(wrap_err)?;

                let mut points = Vec::new();
                for row_result in rows {
                    points.push(row_result.map_err(wrap_err)?);
                }
                Ok(points)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "PointOfInterest"))
    }

    async fn get_point_of_interest(
        &self,
        city_id: i64,
        point_of_interest_id: i64,
    ) -> Result<Option<PointOfInterest>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_POINT_OF_INTEREST)
                    .map_err(wrap_err)?;
                match stmt.query_row([city_id, point_of_interest_id], row_to_point_of_interest) {
                    Ok(point) => Ok(Some(point)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "PointOfInterest"))
    }

    async fn commit(&self, changes: Vec<PendingChange>) -> Result<Vec<PointOfInterest>> {
        self.conn
            .call(move |conn| {
                // Dropping the transaction without committing rolls it back.
                let tx = conn.transaction().map_err(wrap_err)?;

                let mut inserted = Vec::new();
                for change in changes {
                    if let Some(point) = apply_change(&tx, change).map_err(wrap_err)? {
                        inserted.push(point);
                    }
                }

                tx.commit().map_err(wrap_err)?;
                Ok(inserted)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "PointOfInterest"))
    }

    async fn insert_city(&self, city: NewCity) -> Result<City> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_CITY,
                    rusqlite::params![city.name, city.description],
                )
                .map_err(wrap_err)?;

                Ok(City {
                    id: conn.last_insert_rowid(),
                    name: city.name,
                    description: city.description,
                    points_of_interest: Vec::new(),
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "City"))
    }

    async fn delete_city(&self, city_id: i64) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_CITY, [city_id])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "City"))
    }
}
