use crate::city::{NewPointOfInterest, PointOfInterest};

/// A mutation staged in a unit of work, applied by the store on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    /// Insert a new child under `city_id`. The store assigns the id.
    InsertPointOfInterest {
        city_id: i64,
        point: NewPointOfInterest,
    },
    /// Overwrite name and description of the child matching `id` and `city_id`.
    UpdatePointOfInterest(PointOfInterest),
    /// Remove the child matching `id` and `city_id`.
    DeletePointOfInterest { city_id: i64, id: i64 },
}

/// Handle to a staged insert.
///
/// After a successful save, pass it to
/// [`UnitOfWork::inserted`](super::UnitOfWork::inserted) to read the stored
/// entity with its generated id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedInsert(pub(crate) usize);
