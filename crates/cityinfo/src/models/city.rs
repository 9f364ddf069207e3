use serde::Serialize;

use cityinfo_core::city::City;

use super::PointOfInterestDto;

/// City summary used by the list endpoint and by single-city reads that do
/// not ask for children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWithoutPointsOfInterestDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<City> for CityWithoutPointsOfInterestDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            description: city.description,
        }
    }
}

/// City together with its points of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
    pub points_of_interest: Vec<PointOfInterestDto>,
}

impl From<City> for CityDto {
    fn from(city: City) -> Self {
        let points_of_interest: Vec<PointOfInterestDto> = city
            .points_of_interest
            .into_iter()
            .map(PointOfInterestDto::from)
            .collect();

        Self {
            id: city.id,
            name: city.name,
            description: city.description,
            number_of_points_of_interest: points_of_interest.len(),
            points_of_interest,
        }
    }
}
