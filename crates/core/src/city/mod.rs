mod error;
mod patch;
mod requests;
mod types;

pub use error::{PatchError, ValidationErrors};
pub use patch::{PatchDocument, PatchOp, PatchOperation};
pub use requests::{
    validate_fields, PointOfInterestForCreation, PointOfInterestForUpdate,
    DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH,
};
pub use types::{City, NewCity, NewPointOfInterest, PointOfInterest};
