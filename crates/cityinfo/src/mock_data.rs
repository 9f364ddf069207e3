use cityinfo_core::city::{NewCity, NewPointOfInterest};
use cityinfo_core::storage::{CityStore, PendingChange, Result};

/// Demo data set: cities with their points of interest.
fn demo_cities() -> Vec<(NewCity, Vec<NewPointOfInterest>)> {
    vec![
        (
            NewCity::new("New York City").with_description("The one with that big park."),
            vec![
                NewPointOfInterest::new("Central Park")
                    .with_description("The most visited urban park in the United States."),
                NewPointOfInterest::new("Empire State Building")
                    .with_description("A 102-story skyscraper located in Midtown Manhattan."),
            ],
        ),
        (
            NewCity::new("Antwerp")
                .with_description("The one with the cathedral that was never really finished."),
            vec![
                NewPointOfInterest::new("Cathedral of Our Lady").with_description(
                    "A Gothic style cathedral, conceived by architects Jan and Pieter Appelmans.",
                ),
                NewPointOfInterest::new("Antwerp Central Station")
                    .with_description("The finest example of railway architecture in Belgium."),
            ],
        ),
        (
            NewCity::new("Paris").with_description("The one with that big tower."),
            vec![
                NewPointOfInterest::new("Eiffel Tower").with_description(
                    "A wrought iron lattice tower on the Champ de Mars, named after engineer Gustave Eiffel.",
                ),
                NewPointOfInterest::new("The Louvre")
                    .with_description("The world's largest museum."),
            ],
        ),
    ]
}

/// Seeds the store with the demo cities. Returns the number of cities inserted.
pub async fn seed_cities(store: &dyn CityStore) -> Result<usize> {
    let cities = demo_cities();
    let count = cities.len();

    for (city, points) in cities {
        let city = store.insert_city(city).await?;
        let changes = points
            .into_iter()
            .map(|point| PendingChange::InsertPointOfInterest {
                city_id: city.id,
                point,
            })
            .collect();
        store.commit(changes).await?;
    }

    tracing::info!(cities = count, "Seeded demo data");
    Ok(count)
}
