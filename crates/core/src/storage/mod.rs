mod error;
mod traits;
mod types;
mod unit_of_work;

pub use error::{RepositoryError, Result};
pub use traits::{CityRepository, CityStore};
pub use types::{PendingChange, StagedInsert};
pub use unit_of_work::UnitOfWork;
