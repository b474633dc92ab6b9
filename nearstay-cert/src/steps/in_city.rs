use cucumber::{then, when};

use crate::world::CertWorld;

#[when(regex = r#"^I list hotels in "([^"]*)"$"#)]
async fn list_in_city(world: &mut CertWorld, city: String) {
    let outcome = world.resolver().hotels_in_city(&city).await;
    match outcome {
        Ok(hotels) => {
            world.city_hotels = Some(hotels);
            world.last_error = None;
        }
        Err(e) => {
            world.city_hotels = None;
            world.last_error = Some(e);
        }
    }
}

#[then(regex = r#"^the city listing returns (\d+) hotels?$"#)]
async fn city_count(world: &mut CertWorld, expected: usize) {
    let hotels = world.city_hotels.as_ref().expect("city listing failed");
    assert_eq!(hotels.len(), expected);
}

#[then(regex = r#"^the city hotels are: (.+)$"#)]
async fn city_names(world: &mut CertWorld, names: String) {
    let hotels = world.city_hotels.as_ref().expect("city listing failed");
    let mut expected: Vec<String> = names.split(',').map(|n| n.trim().to_string()).collect();
    expected.sort();
    assert_eq!(CertWorld::hotel_names(hotels), expected);
}
