//! Basic usage example for worldcities
//!
//! This example demonstrates how to:
//! - Create countries and cities
//! - Read them back by id and by code
//! - Page through a listing
//! - Save and reload a snapshot

use rust_decimal::Decimal;
use worldcities::prelude::*;

fn main() -> Result<()> {
    println!("=== worldcities Basic Usage Example ===\n");

    let mut db = WorldDb::new();

    // Example 1: Create records
    println!("--- Example 1: Create countries and cities ---");
    let italy = db.create_country(NewCountry::new("Italy", "IT", "ITA"))?;
    let japan = db.create_country(NewCountry::new("Japan", "JP", "JPN"))?;
    println!("Created {} (id {})", italy.name(), italy.id());
    println!("Created {} (id {})", japan.name(), japan.id());

    let cities = [
        ("Roma", "41.9", "12.5", italy.id()),
        ("Milano", "45.4642", "9.19", italy.id()),
        ("Napoli", "40.8518", "14.2681", italy.id()),
        ("東京", "35.6895", "139.6917", japan.id()),
    ];
    for (name, lat, lon, country_id) in cities {
        let lat: Decimal = lat.parse().expect("literal latitude");
        let lon: Decimal = lon.parse().expect("literal longitude");
        let city = db.create_city(NewCity::new(name, lat, lon, country_id))?;
        println!("  {} -> {} ({}, {})", city.name(), city.name_ascii(), city.lat(), city.lon());
    }
    println!();

    // Example 2: Lookups
    println!("--- Example 2: Find country by code ---");
    if let Some(country) = db.find_country_by_code("jpn") {
        println!("Found: {} ({}/{})", country.name(), country.iso2(), country.iso3());
        for city in db.cities_of(country.id())? {
            println!("  - {}", city.name());
        }
    }
    println!();

    // Example 3: Paging
    println!("--- Example 3: Page through all cities, two at a time ---");
    let listing = db.list_cities(&CityFilter::default(), Pagination::new(2))?;
    for page in listing.pages() {
        println!("Page {} of {}: {:?}", page.index + 1, page.total_pages, page.ids());
    }
    println!();

    // Example 4: Snapshot
    println!("--- Example 4: Snapshot round trip ---");
    let path = std::env::temp_dir().join("worldcities-demo.db");
    db.save_snapshot(&path)?;
    let reloaded = WorldDb::load_snapshot(&path, StoreConfig::default())?;
    let stats = reloaded.stats();
    println!(
        "Reloaded {} countries and {} cities from {}",
        stats.countries,
        stats.cities,
        path.display()
    );

    Ok(())
}
