//! Error handling example for worldcities
//!
//! This example walks through each error kind the store reports.

use rust_decimal::Decimal;
use worldcities::prelude::*;

fn main() -> Result<()> {
    println!("=== worldcities Error Handling Example ===\n");

    let mut db = WorldDb::new();
    let italy = db.create_country(NewCountry::new("Italy", "IT", "ITA"))?;
    let roma = db.create_city(NewCity::new(
        "Roma",
        Decimal::new(419, 1),
        Decimal::new(125, 1),
        italy.id(),
    ))?;

    // Example 1: Validation
    println!("--- Example 1: Malformed input ---");
    for new in [
        NewCountry::new("", "FR", "FRA"),
        NewCountry::new("France", "FRA", "FRA"),
        NewCountry::new("France", "F1", "FRA"),
    ] {
        match db.create_country(new) {
            Ok(c) => println!("  Created: {}", c.name()),
            Err(e) => println!("  Rejected: {e}"),
        }
    }
    println!();

    // Example 2: Foreign key
    println!("--- Example 2: City pointing at a missing country ---");
    match db.create_city(NewCity::new("Paris", Decimal::new(4886, 2), Decimal::new(235, 2), 999)) {
        Ok(c) => println!("  Created: {}", c.name()),
        Err(e) if e.is_constraint() => println!("  Constraint: {e}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 3: Missing ids
    println!("--- Example 3: Missing ids ---");
    match db.update_city(404, CityPatch::default().name("Ghost")) {
        Ok(_) => println!("  Updated?"),
        Err(e) if e.is_not_found() => println!("  Not found: {e}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 4: Delete policy
    println!("--- Example 4: Deleting a referenced country ---");
    match db.delete_country(italy.id()) {
        Ok(_) => println!("  Deleted?"),
        Err(e) => println!("  Refused: {e}"),
    }
    let report = db.delete_country_with(italy.id(), DeletePolicy::Cascade)?;
    println!(
        "  With cascade: removed country {} and cities {:?} (Roma was {})",
        report.id,
        report.cascaded_cities,
        roma.id()
    );

    Ok(())
}
