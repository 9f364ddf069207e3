pub mod cities;
pub mod error;
pub mod health;
pub mod points_of_interest;

pub use error::ApiError;
