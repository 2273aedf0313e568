use rust_decimal::Decimal;
use worldcities_core::*;

fn sample() -> WorldDb {
    let mut db = WorldDb::new();
    let it = db
        .create_country(NewCountry::new("Italy", "IT", "ITA"))
        .unwrap();
    let ch = db
        .create_country(NewCountry::new("Schweiz", "CH", "CHE"))
        .unwrap();
    db.create_city(NewCity::new("Roma", Decimal::new(419, 1), Decimal::new(125, 1), it.id()))
        .unwrap();
    db.create_city(NewCity::new("Zürich", Decimal::new(4737, 2), Decimal::new(854, 2), ch.id()))
        .unwrap();
    let gone = db
        .create_city(NewCity::new("Gone", Decimal::ZERO, Decimal::ZERO, ch.id()))
        .unwrap();
    db.delete_city(gone.id()).unwrap();
    db
}

fn same_records(a: &WorldDb, b: &WorldDb) {
    assert_eq!(a.countries().collect::<Vec<_>>(), b.countries().collect::<Vec<_>>());
    assert_eq!(a.cities().collect::<Vec<_>>(), b.cities().collect::<Vec<_>>());
}

#[test]
fn snapshot_round_trip_keeps_records_and_counters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.db");
    let db = sample();
    db.save_snapshot(&path).unwrap();

    let mut loaded = WorldDb::load_snapshot(&path, StoreConfig::default()).unwrap();
    same_records(&db, &loaded);

    // City 3 was deleted before saving; its id stays retired.
    let next = loaded
        .create_city(NewCity::new("Bern", Decimal::new(4695, 2), Decimal::new(745, 2), 2))
        .unwrap();
    assert_eq!(next.id(), 4);
}

#[test]
fn uncompressed_snapshot_loads_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.raw");
    let db = sample();
    db.save_snapshot_with(&path, CompressionMode::None).unwrap();
    let loaded = WorldDb::load_snapshot(&path, StoreConfig::default()).unwrap();
    same_records(&db, &loaded);
}

#[test]
fn saving_over_an_existing_snapshot_replaces_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.db");
    let mut db = sample();
    db.save_snapshot(&path).unwrap();

    db.create_country(NewCountry::new("Japan", "JP", "JPN")).unwrap();
    db.save_snapshot(&path).unwrap();

    let loaded = WorldDb::load_snapshot(&path, StoreConfig::default()).unwrap();
    same_records(&db, &loaded);
    assert_eq!(loaded.stats().countries, 3);

    // Only the snapshot itself is left behind; no temp files.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn failed_save_keeps_the_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.db");
    let db = sample();
    db.save_snapshot(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    // The target's directory does not exist, so no temp file can be created.
    let err = db
        .save_snapshot(dir.path().join("missing").join("world.db"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn truncated_snapshot_is_rejected() {
    let db = sample();
    let bytes = db.to_snapshot_bytes().unwrap();
    assert!(WorldDb::from_snapshot_bytes(&bytes, StoreConfig::default()).is_ok());

    let err = WorldDb::from_snapshot_bytes(&bytes[..bytes.len() / 2], StoreConfig::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Bincode(_)));
}

#[test]
fn missing_snapshot_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = WorldDb::load_snapshot(dir.path().join("absent.db"), StoreConfig::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn json_seed_import_keeps_ids() {
    let seed = r#"{
        "countries": [
            { "id": 5, "name": "Italy", "iso2": "IT", "iso3": "ITA" },
            { "id": 9, "name": "Japan", "ISO2": "jp", "ISO3": "jpn" }
        ],
        "cities": [
            { "id": 1, "name": "Roma", "name_ascii": "Roma", "lat": 41.9, "lon": 12.5, "country_id": 5 },
            { "id": 7, "name": "東京", "name_ASCII": "Tokyo", "lat": "35.6895", "lon": "139.6917", "countryId": 9 }
        ]
    }"#;
    let mut db = WorldDb::import_json(seed.as_bytes(), StoreConfig::default()).unwrap();

    assert_eq!(db.stats(), DbStats { countries: 2, cities: 2 });
    let tokyo = db.city(7).unwrap();
    assert_eq!(tokyo.name_ascii(), "Tokyo");
    assert_eq!(tokyo.lat(), Decimal::new(356895, 4));
    assert_eq!(db.country(9).unwrap().iso2(), "JP");
    assert_eq!(db.city(1).unwrap().lat(), Decimal::new(419, 1));

    let next = db
        .create_country(NewCountry::new("France", "FR", "FRA"))
        .unwrap();
    assert_eq!(next.id(), 10);
}

#[test]
fn json_seed_with_orphan_city_is_rejected() {
    let seed = r#"{
        "countries": [{ "id": 1, "name": "Italy", "iso2": "IT", "iso3": "ITA" }],
        "cities": [{ "id": 1, "name": "Paris", "lat": 48.86, "lon": 2.35, "country_id": 2 }]
    }"#;
    let err = WorldDb::import_json(seed.as_bytes(), StoreConfig::default()).unwrap_err();
    assert!(err.is_constraint(), "got {err:?}");
}

#[test]
fn json_seed_with_duplicate_ids_is_rejected() {
    let seed = r#"{
        "countries": [
            { "id": 1, "name": "Italy", "iso2": "IT", "iso3": "ITA" },
            { "id": 1, "name": "France", "iso2": "FR", "iso3": "FRA" }
        ]
    }"#;
    let err = WorldDb::import_json(seed.as_bytes(), StoreConfig::default()).unwrap_err();
    assert!(err.is_constraint());
}

#[test]
fn json_seed_with_bad_coordinate_is_validation_error() {
    let seed = r#"{
        "countries": [{ "id": 1, "name": "Italy", "iso2": "IT", "iso3": "ITA" }],
        "cities": [{ "id": 1, "name": "Roma", "lat": "north", "lon": 12.5, "country_id": 1 }]
    }"#;
    let err = WorldDb::import_json(seed.as_bytes(), StoreConfig::default()).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "lat", .. }));
}

#[test]
fn json_seed_string_coordinates_keep_every_digit() {
    let seed = r#"{
        "countries": [{ "id": 1, "name": "Italy", "iso2": "IT", "iso3": "ITA" }],
        "cities": [{ "id": 1, "name": "Roma", "lat": "41.902782123456789012345", "lon": "12.5", "country_id": 1 }]
    }"#;
    let db = WorldDb::import_json(seed.as_bytes(), StoreConfig::default()).unwrap();
    let lat: Decimal = "41.902782123456789012345".parse().unwrap();
    assert_eq!(db.city(1).unwrap().lat(), lat);
}
