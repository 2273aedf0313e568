//! Advanced filtering example for worldcities
//!
//! Demonstrates accent-insensitive search, per-country filters, sorting,
//! and seeding the store from JSON.

use worldcities::prelude::*;

const SEED: &str = r#"{
  "countries": [
    { "id": 1, "name": "Schweiz", "iso2": "CH", "iso3": "CHE" },
    { "id": 2, "name": "Polska", "iso2": "PL", "iso3": "POL" },
    { "id": 3, "name": "Österreich", "iso2": "AT", "iso3": "AUT" }
  ],
  "cities": [
    { "id": 1, "name": "Zürich", "lat": 47.3769, "lon": 8.5417, "country_id": 1 },
    { "id": 2, "name": "Genève", "name_ascii": "Geneva", "lat": 46.2044, "lon": 6.1432, "country_id": 1 },
    { "id": 3, "name": "Łódź", "lat": 51.7592, "lon": 19.4560, "country_id": 2 },
    { "id": 4, "name": "Kraków", "lat": "50.0647", "lon": "19.9450", "country_id": 2 },
    { "id": 5, "name": "Wien", "name_ascii": "Vienna", "lat": 48.2082, "lon": 16.3738, "country_id": 3 }
  ]
}"#;

fn main() -> Result<()> {
    println!("=== worldcities Advanced Filtering Example ===\n");

    let db = WorldDb::import_json(SEED.as_bytes(), StoreConfig::default())?;
    let stats = db.stats();
    println!("Seeded {} countries, {} cities\n", stats.countries, stats.cities);

    // Example 1: Accent-insensitive name search
    println!("--- Example 1: Accent-insensitive search ---");
    for q in ["zur", "lodz", "geneva", "KRAKOW"] {
        let hits = db.list_cities(&CityFilter::default().name_contains(q), Pagination::new(10))?;
        let names: Vec<&str> = hits.iter().map(City::name).collect();
        println!("  {q:>8} -> {names:?}");
    }
    println!();

    // Example 2: Per-country listing
    println!("--- Example 2: Cities of Poland ---");
    if let Some(pl) = db.find_country_by_code("POL") {
        let filter = CityFilter::default().country_id(pl.id());
        for city in db.list_cities(&filter, Pagination::new(10))?.iter() {
            println!("  {} ({})", city.name(), city.name_ascii());
        }
    }
    println!();

    // Example 3: Sorting
    println!("--- Example 3: Countries by name vs by id ---");
    let by_name = db.list_countries(&CountryFilter::default(), Pagination::new(10))?;
    let by_id = db.list_countries(
        &CountryFilter::default(),
        Pagination::new(10).sorted_by(SortKey::Id),
    )?;
    println!("  by name: {:?}", by_name.iter().map(Country::name).collect::<Vec<_>>());
    println!("  by id:   {:?}", by_id.iter().map(Country::name).collect::<Vec<_>>());

    Ok(())
}
