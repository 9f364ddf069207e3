//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
///
/// Foreign keys are enabled per connection, so this must run on every open.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Cities table
CREATE TABLE IF NOT EXISTS cities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 50),
    description TEXT
);

-- Points of interest table
CREATE TABLE IF NOT EXISTS points_of_interest (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city_id INTEGER NOT NULL,
    name TEXT NOT NULL CHECK (length(name) <= 50),
    description TEXT,
    FOREIGN KEY (city_id) REFERENCES cities(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_points_of_interest_city_id ON points_of_interest(city_id);
"#;

// City queries
pub const CITY_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM cities WHERE id = ?1)
"#;

pub const SELECT_CITIES: &str = r#"
SELECT id, name, description
FROM cities
ORDER BY name ASC
"#;

pub const SELECT_CITY_BY_ID: &str = r#"
SELECT id, name, description
FROM cities
WHERE id = ?1
"#;

pub const SELECT_CITY_WITH_POINTS_OF_INTEREST: &str = r#"
SELECT c.id, c.name, c.description, p.id, p.city_id, p.name, p.description
FROM cities c
LEFT JOIN points_of_interest p ON p.city_id = c.id
WHERE c.id = ?1
ORDER BY p.id ASC
"#;

pub const INSERT_CITY: &str = r#"
INSERT INTO cities (name, description)
VALUES (?1, ?2)
"#;

pub const DELETE_CITY: &str = r#"
DELETE FROM cities
WHERE id = ?1
"#;

// Point of interest queries
pub const SELECT_POINTS_OF_INTEREST_BY_CITY: &str = r#"
SELECT id, city_id, name, description
FROM points_of_interest
WHERE city_id = ?1
ORDER BY id ASC
"#;

pub const SELECT_POINT_OF_INTEREST: &str = r#"
SELECT id, city_id, name, description
FROM points_of_interest
WHERE city_id = ?1 AND id = ?2
"#;

pub const INSERT_POINT_OF_INTEREST: &str = r#"
INSERT INTO points_of_interest (city_id, name, description)
VALUES (?1, ?2, ?3)
"#;

pub const UPDATE_POINT_OF_INTEREST: &str = r#"
UPDATE points_of_interest
SET name = ?3, description = ?4
WHERE city_id = ?1 AND id = ?2
"#;

pub const DELETE_POINT_OF_INTEREST: &str = r#"
DELETE FROM points_of_interest
WHERE city_id = ?1 AND id = ?2
"#;
