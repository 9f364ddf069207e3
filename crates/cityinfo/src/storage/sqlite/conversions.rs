//! SQLite row conversion functions.
//!
//! Pure functions for converting SQLite rows into domain types.

use cityinfo_core::city::{City, PointOfInterest};
use rusqlite::Row;

/// Convert a SQLite row to a City without children.
///
/// Expected columns: id, name, description
pub fn row_to_city(row: &Row) -> rusqlite::Result<City> {
    Ok(City {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        points_of_interest: Vec::new(),
    })
}

/// Convert a SQLite row to a PointOfInterest.
///
/// Expected columns: id, city_id, name, description
pub fn row_to_point_of_interest(row: &Row) -> rusqlite::Result<PointOfInterest> {
    Ok(PointOfInterest {
        id: row.get(0)?,
        city_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
    })
}

/// Convert a row of the city/point-of-interest LEFT JOIN.
///
/// Expected columns: c.id, c.name, c.description, p.id, p.city_id, p.name, p.description.
/// The point is `None` for a city without children.
pub fn row_to_city_with_point_of_interest(
    row: &Row,
) -> rusqlite::Result<(City, Option<PointOfInterest>)> {
    let city = row_to_city(row)?;

    let point_id: Option<i64> = row.get(3)?;
    let point = match point_id {
        Some(id) => Some(PointOfInterest {
            id,
            city_id: row.get(4)?,
            name: row.get(5)?,
            description: row.get(6)?,
        }),
        None => None,
    };

    Ok((city, point))
}

/// Fold joined rows into a single city with its children.
pub fn collect_city(rows: Vec<(City, Option<PointOfInterest>)>) -> Option<City> {
    let mut rows = rows.into_iter();
    let (mut city, first) = rows.next()?;

    city.points_of_interest = first
        .into_iter()
        .chain(rows.filter_map(|(_, point)| point))
        .collect();

    Some(city)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City {
            id: 1,
            name: "Paris".to_string(),
            description: None,
            points_of_interest: Vec::new(),
        }
    }

    fn point(id: i64, name: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            city_id: 1,
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_collect_city_empty_rows() {
        assert!(collect_city(Vec::new()).is_none());
    }

    #[test]
    fn test_collect_city_without_children() {
        let city = collect_city(vec![(paris(), None)]).unwrap();
        assert_eq!(city.name, "Paris");
        assert!(city.points_of_interest.is_empty());
    }

    #[test]
    fn test_collect_city_with_children() {
        let city = collect_city(vec![
            (paris(), Some(point(1, "Eiffel Tower"))),
            (paris(), Some(point(2, "Louvre"))),
        ])
        .unwrap();

        assert_eq!(
            city.points_of_interest,
            vec![point(1, "Eiffel Tower"), point(2, "Louvre")]
        );
    }
}
