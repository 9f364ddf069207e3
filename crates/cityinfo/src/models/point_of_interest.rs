use serde::Serialize;

use cityinfo_core::city::PointOfInterest;

/// Point of interest as returned to clients. The owning city is implied by the URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<PointOfInterest> for PointOfInterestDto {
    fn from(point: PointOfInterest) -> Self {
        Self {
            id: point.id,
            name: point.name,
            description: point.description,
        }
    }
}
