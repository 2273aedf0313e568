use rust_decimal::Decimal;
use std::collections::HashSet;
use worldcities_core::*;

fn seeded(cities: u32) -> WorldDb {
    let mut db = WorldDb::new();
    let it = db
        .create_country(NewCountry::new("Italy", "IT", "ITA"))
        .unwrap();
    let de = db
        .create_country(NewCountry::new("Deutschland", "DE", "DEU"))
        .unwrap();
    for i in 0..cities {
        let country = if i % 2 == 0 { it.id() } else { de.id() };
        db.create_city(NewCity::new(
            format!("City {i:02}"),
            Decimal::new(i64::from(i), 1),
            Decimal::ZERO,
            country,
        ))
        .unwrap();
    }
    db
}

#[test]
fn twenty_five_cities_in_pages_of_ten() {
    let db = seeded(25);
    let listing = db
        .list_cities(&CityFilter::default(), Pagination::new(10))
        .unwrap();

    let pages: Vec<Page<City>> = listing.pages().collect();
    let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
    assert_eq!(sizes, vec![10, 10, 5]);

    let mut seen = HashSet::new();
    for page in &pages {
        for id in page.ids() {
            assert!(seen.insert(id), "id {id} appeared twice");
        }
    }
    let all: HashSet<u32> = db.cities().map(City::id).collect();
    assert_eq!(seen, all);
    assert!(pages[2].is_last());
    assert_eq!(pages[0].total_items, 25);
    assert_eq!(pages[0].total_pages, 3);
}

#[test]
fn listing_is_restartable_and_deterministic() {
    let db = seeded(25);
    let listing = db
        .list_cities(&CityFilter::default(), Pagination::new(10))
        .unwrap();
    let first: Vec<Vec<u32>> = listing.pages().map(|p| p.ids()).collect();
    let again: Vec<Vec<u32>> = listing.pages().map(|p| p.ids()).collect();
    assert_eq!(first, again);

    let fresh = db
        .list_cities(&CityFilter::default(), Pagination::new(10))
        .unwrap();
    let third: Vec<Vec<u32>> = (&fresh).into_iter().map(|p| p.ids()).collect();
    assert_eq!(first, third);
}

#[test]
fn pages_are_lazy_and_can_be_fetched_directly() {
    let db = seeded(25);
    let listing = db
        .list_cities(&CityFilter::default(), Pagination::new(10))
        .unwrap();
    let mut pages = listing.pages();
    assert_eq!(pages.len(), 3);
    pages.next();
    assert_eq!(pages.len(), 2);

    let last = listing.page(2).unwrap();
    assert_eq!(last.len(), 5);
    assert!(listing.page(3).is_none());
}

#[test]
fn sort_by_name_and_by_id() {
    let mut db = WorldDb::new();
    let it = db
        .create_country(NewCountry::new("Italy", "IT", "ITA"))
        .unwrap();
    for name in ["Torino", "ancona", "Émilia", "Bari"] {
        db.create_city(NewCity::new(name, Decimal::ZERO, Decimal::ZERO, it.id()))
            .unwrap();
    }

    let by_name: Vec<&str> = db
        .list_cities(&CityFilter::default(), Pagination::new(10))
        .unwrap()
        .iter()
        .map(City::name)
        .collect();
    assert_eq!(by_name, vec!["ancona", "Bari", "Émilia", "Torino"]);

    let listing = db
        .list_cities(
            &CityFilter::default(),
            Pagination::new(10).sorted_by(SortKey::Id),
        )
        .unwrap();
    assert_eq!(listing.ids(), &[1, 2, 3, 4]);
}

#[test]
fn city_filter_by_country_and_name() {
    let db = seeded(25);
    let italian = db
        .list_cities(&CityFilter::default().country_id(1), Pagination::new(100))
        .unwrap();
    assert_eq!(italian.total(), 13);
    assert!(italian.iter().all(|c| c.country_id() == 1));

    let named = db
        .list_cities(&CityFilter::default().name_contains("city 1"), Pagination::new(100))
        .unwrap();
    assert_eq!(named.total(), 10);
}

#[test]
fn city_filter_matches_ascii_name() {
    let mut db = WorldDb::new();
    let dk = db
        .create_country(NewCountry::new("Danmark", "DK", "DNK"))
        .unwrap();
    db.create_city(
        NewCity::new("København", Decimal::new(5568, 2), Decimal::new(1257, 2), dk.id())
            .with_ascii("Copenhagen"),
    )
    .unwrap();

    for q in ["kobenhavn", "copen"] {
        let hits = db
            .list_cities(&CityFilter::default().name_contains(q), Pagination::new(5))
            .unwrap();
        assert_eq!(hits.total(), 1, "query {q}");
    }
}

#[test]
fn country_filter_by_name_and_code() {
    let db = seeded(0);
    let by_name = db
        .list_countries(
            &CountryFilter::default().name_contains("deutsch"),
            Pagination::new(10),
        )
        .unwrap();
    assert_eq!(by_name.ids(), &[2]);

    let by_code = db
        .list_countries(&CountryFilter::default().code("ita"), Pagination::new(10))
        .unwrap();
    assert_eq!(by_code.ids(), &[1]);

    let all = db
        .list_countries(&CountryFilter::default(), Pagination::new(10))
        .unwrap();
    let names: Vec<&str> = all.iter().map(Country::name).collect();
    assert_eq!(names, vec!["Deutschland", "Italy"]);
}

#[test]
fn page_size_must_be_within_bounds() {
    let db = seeded(3);
    let err = db
        .list_cities(&CityFilter::default(), Pagination::new(0))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "page_size", .. }));

    let max = db.config().max_page_size;
    assert!(db
        .list_cities(&CityFilter::default(), Pagination::new(max + 1))
        .is_err());
    assert!(db
        .list_cities(&CityFilter::default(), db.config().default_pagination())
        .is_ok());
}

#[test]
fn empty_store_lists_nothing() {
    let db = WorldDb::new();
    let listing = db
        .list_countries(&CountryFilter::default(), Pagination::new(10))
        .unwrap();
    assert!(listing.is_empty());
    assert_eq!(listing.page_count(), 0);
    assert_eq!(listing.pages().count(), 0);
}
