mod city;
mod point_of_interest;

pub use city::{CityDto, CityWithoutPointsOfInterestDto};
pub use point_of_interest::PointOfInterestDto;
