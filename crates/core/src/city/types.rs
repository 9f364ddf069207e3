use serde::{Deserialize, Serialize};

/// A city and, when eagerly loaded, the points of interest it owns.
///
/// `points_of_interest` is only meaningful when the city was fetched with
/// children included; otherwise it is left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub points_of_interest: Vec<PointOfInterest>,
}

/// A point of interest, always owned by exactly one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: i64,
    pub city_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A city that has not been stored yet. The store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub description: Option<String>,
}

impl NewCity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description for this city.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A point of interest that has not been stored yet.
///
/// The owning city is given when the point is staged, and the id is
/// assigned by the store on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPointOfInterest {
    pub name: String,
    pub description: Option<String>,
}

impl NewPointOfInterest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description for this point of interest.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Materializes the stored entity once the store has assigned an id.
    pub fn into_point_of_interest(self, id: i64, city_id: i64) -> PointOfInterest {
        PointOfInterest {
            id,
            city_id,
            name: self.name,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_serializes_camel_case() {
        let city = City {
            id: 1,
            name: "Paris".to_string(),
            description: None,
            points_of_interest: vec![PointOfInterest {
                id: 7,
                city_id: 1,
                name: "Eiffel Tower".to_string(),
                description: Some("Famous tower".to_string()),
            }],
        };

        let json = serde_json::to_value(&city).unwrap();

        assert_eq!(json["pointsOfInterest"][0]["cityId"], 1);
        assert_eq!(json["pointsOfInterest"][0]["name"], "Eiffel Tower");
    }

    #[test]
    fn test_new_point_of_interest_materializes_with_ids() {
        let point = NewPointOfInterest::new("Louvre")
            .with_description("The world's largest museum")
            .into_point_of_interest(3, 1);

        assert_eq!(point.id, 3);
        assert_eq!(point.city_id, 1);
        assert_eq!(point.name, "Louvre");
        assert_eq!(
            point.description.as_deref(),
            Some("The world's largest museum")
        );
    }

    #[test]
    fn test_new_city_builder() {
        let city = NewCity::new("Antwerp").with_description("The one with the cathedral");
        assert_eq!(city.name, "Antwerp");
        assert_eq!(
            city.description.as_deref(),
            Some("The one with the cathedral")
        );
    }
}
