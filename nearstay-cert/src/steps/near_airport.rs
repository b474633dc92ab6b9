use cucumber::{then, when};
use nearstay_core::SearchRequest;

use crate::world::CertWorld;

const JOIN_FIELDS: [&str; 3] = ["alat", "alon", "accuracy"];

#[when(regex = r#"^I search for hotels within (-?\d+) km of "([^"]*)"$"#)]
async fn search_near_airport(world: &mut CertWorld, within_km: i64, airport_name: String) {
    let request = SearchRequest::new(airport_name, within_km);
    let outcome = world.resolver().hotels_near_airport(&request).await;
    match outcome {
        Ok(result) => {
            world.results_by_radius.insert(within_km, result.clone());
            world.last_result = Some(result);
            world.last_error = None;
        }
        Err(e) => {
            world.last_result = None;
            world.last_error = Some(e);
        }
    }
}

#[then(regex = r#"^the search returns (\d+) hotels?$"#)]
async fn hotel_count(world: &mut CertWorld, expected: usize) {
    assert_eq!(world.result().hotels.len(), expected);
}

#[then(regex = r#"^the hotels are: (.+)$"#)]
async fn hotel_names(world: &mut CertWorld, names: String) {
    let mut expected: Vec<String> = names.split(',').map(|n| n.trim().to_string()).collect();
    expected.sort();
    assert_eq!(CertWorld::hotel_names(&world.result().hotels), expected);
}

#[then(regex = r#"^the airport is "([^"]+)" at (-?[\d.]+), (-?[\d.]+) with accuracy "([^"]+)"$"#)]
async fn airport_is(world: &mut CertWorld, name: String, lat: f64, lon: f64, accuracy: String) {
    let airport = world
        .result()
        .airport
        .as_ref()
        .expect("expected an airport");
    assert_eq!(airport.name, name);
    assert!((airport.location.lat - lat).abs() < 1e-9);
    assert!((airport.location.lon - lon).abs() < 1e-9);
    assert_eq!(airport.location.accuracy, accuracy);
}

#[then("the airport is null")]
async fn airport_is_null(world: &mut CertWorld) {
    assert!(world.result().airport.is_none());
}

#[then("no hotel carries airport join fields")]
async fn no_join_fields(world: &mut CertWorld) {
    for hotel in &world.result().hotels {
        for field in JOIN_FIELDS {
            assert!(!hotel.contains_key(field), "{field} left in {hotel:?}");
        }
        assert!(hotel.contains_key("geo"), "hotel geo was dropped: {hotel:?}");
    }
}

#[then(regex = r#"^every hotel found within (\d+) km is also found within (\d+) km$"#)]
async fn monotonic(world: &mut CertWorld, smaller: i64, larger: i64) {
    let inner = CertWorld::hotel_names(&world.results_by_radius[&smaller].hotels);
    let outer = CertWorld::hotel_names(&world.results_by_radius[&larger].hotels);
    for name in &inner {
        assert!(outer.contains(name), "{name} within {smaller} km but not {larger} km");
    }
    assert!(inner.len() <= outer.len());
}

#[then("the result serializes as an empty search")]
async fn serializes_empty(world: &mut CertWorld) {
    let value = serde_json::to_value(world.result()).unwrap();
    assert_eq!(value, serde_json::json!({"hotels": [], "airport": null}));
}
