//! Command-line interface for worldcities-core
//!
//! Every invocation loads the snapshot given by `--db` (an empty store if
//! the file does not exist yet), runs one command, and writes the snapshot
//! back when the command changed something.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ worldcities stats
//!
//! - Seed the store from a JSON document
//!   $ worldcities import data/seed.json
//!
//! - Look up a country by id or code (ISO2 or ISO3, case-insensitive)
//!   $ worldcities country ita
//!
//! - List the cities of a country, twenty per page
//!   $ worldcities --page-size 20 cities --country IT --page 1
//!
//! - Delete a country and everything that references it
//!   $ worldcities --cascade delete-country 3
mod args;

use crate::args::{CliArgs, Commands, SortArg};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use worldcities_core::prelude::*;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let policy = if args.cascade {
        DeletePolicy::Cascade
    } else {
        DeletePolicy::Restrict
    };
    let mut config = StoreConfig::default().with_delete_policy(policy);
    if let Some(size) = args.page_size {
        let max = config.max_page_size.max(size);
        config = config.with_page_sizes(size, max);
    }

    let db_path = Path::new(&args.db);
    let mut db = if db_path.exists() {
        WorldDb::load_snapshot(db_path, config.clone())
            .with_context(|| format!("loading {}", db_path.display()))?
    } else {
        info!(path = %db_path.display(), "no snapshot yet, starting empty");
        WorldDb::with_config(config.clone())?
    };

    let pagination = |sort: SortArg| -> Pagination {
        config.default_pagination().sorted_by(match sort {
            SortArg::Name => SortKey::Name,
            SortArg::Id => SortKey::Id,
        })
    };

    let dirty = match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Store statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Cities: {}", stats.cities);
            false
        }

        Commands::Countries { name, page, sort } => {
            let filter = CountryFilter {
                name_contains: name,
                code: None,
            };
            let listing = db.list_countries(&filter, pagination(sort))?;
            print_page(&listing, page, |c: &Country| {
                format!("{:>5}  {} ({}/{})", c.id(), c.name(), c.iso2(), c.iso3())
            });
            false
        }

        Commands::Country { key } => {
            let country = resolve_country(&db, &key)?;
            println!("Country: {}", country.name());
            println!("Id: {}", country.id());
            println!("ISO2: {}", country.iso2());
            println!("ISO3: {}", country.iso3());
            println!("Cities: {}", db.cities_of(country.id())?.len());
            false
        }

        Commands::Cities {
            country,
            name,
            page,
            sort,
        } => {
            let country_id = country
                .as_deref()
                .map(|key| resolve_country(&db, key).map(Country::id))
                .transpose()?;
            let filter = CityFilter {
                name_contains: name,
                country_id,
            };
            let listing = db.list_cities(&filter, pagination(sort))?;
            print_page(&listing, page, |c: &City| {
                format!(
                    "{:>7}  {} [{}] {}, {} (country {})",
                    c.id(),
                    c.name(),
                    c.name_ascii(),
                    c.lat(),
                    c.lon(),
                    c.country_id()
                )
            });
            false
        }

        Commands::AddCountry { name, iso2, iso3 } => {
            let country = db.create_country(NewCountry::new(name, iso2, iso3))?;
            println!("Created country {} ({})", country.id(), country.name());
            true
        }

        Commands::AddCity {
            name,
            country,
            lat,
            lon,
            ascii,
        } => {
            let country_id = resolve_country(&db, &country)?.id();
            let mut new = NewCity::new(name, lat, lon, country_id);
            if let Some(ascii) = ascii {
                new = new.with_ascii(ascii);
            }
            let city = db.create_city(new)?;
            println!("Created city {} ({})", city.id(), city.name());
            true
        }

        Commands::UpdateCountry {
            id,
            name,
            iso2,
            iso3,
        } => {
            let patch = CountryPatch { name, iso2, iso3 };
            if patch.is_empty() {
                return Err(anyhow!("nothing to update"));
            }
            let country = db.update_country(id, patch)?;
            println!("Updated country {} ({})", country.id(), country.name());
            true
        }

        Commands::UpdateCity {
            id,
            name,
            ascii,
            lat,
            lon,
            country,
        } => {
            let country_id = country
                .as_deref()
                .map(|key| resolve_country(&db, key).map(Country::id))
                .transpose()?;
            let patch = CityPatch {
                name,
                name_ascii: ascii,
                lat,
                lon,
                country_id,
            };
            if patch.is_empty() {
                return Err(anyhow!("nothing to update"));
            }
            let city = db.update_city(id, patch)?;
            println!("Updated city {} ({})", city.id(), city.name());
            true
        }

        Commands::DeleteCountry { id } => {
            let report = db.delete_country(id)?;
            println!(
                "Deleted country {} and {} cities",
                report.id,
                report.cascaded_cities.len()
            );
            true
        }

        Commands::DeleteCity { id } => {
            db.delete_city(id)?;
            println!("Deleted city {id}");
            true
        }

        #[cfg(feature = "json")]
        Commands::Import { path } => {
            db = WorldDb::import_json_file(&path, config.clone())
                .with_context(|| format!("importing {path}"))?;
            let stats = db.stats();
            println!(
                "Imported {} countries and {} cities",
                stats.countries, stats.cities
            );
            true
        }
    };

    if dirty {
        db.save_snapshot(db_path)
            .with_context(|| format!("saving {}", db_path.display()))?;
    }
    Ok(())
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Numeric keys are ids; anything else is tried as an ISO2/ISO3 code and
/// then as a country name.
fn resolve_country<'a>(db: &'a WorldDb, key: &str) -> anyhow::Result<&'a Country> {
    if let Ok(id) = key.trim().parse::<u32>() {
        return Ok(db.country(id)?);
    }
    db.find_country_by_code(key)
        .or_else(|| db.find_country_by_name(key))
        .ok_or_else(|| anyhow!("no country found for: {key}"))
}

fn print_page<E: Entity>(listing: &Listing<'_, E>, page: usize, line: impl Fn(&E) -> String) {
    match listing.page(page) {
        Some(p) => {
            for item in &p.items {
                println!("{}", line(item));
            }
            println!(
                "-- page {} of {} ({} total)",
                p.index + 1,
                p.total_pages,
                p.total_items
            );
        }
        None if listing.is_empty() => println!("No matches."),
        None => eprintln!(
            "Page {page} is out of range (0..{})",
            listing.page_count()
        ),
    }
}
