use async_trait::async_trait;
use nearstay_core::{
    Airport, Hotel, HotelResolver, Location, NearstayError, Result, RootConfig, SearchRequest,
    SearchResult,
};
use nearstay_graphlette::{build_schema, HOTELS_GRAPHQL};
use serde_json::{json, Value};
use std::sync::Arc;

struct FixtureResolver;

fn hotel(doc: Value) -> Hotel {
    doc.as_object().cloned().expect("hotel fixture must be an object")
}

#[async_trait]
impl HotelResolver for FixtureResolver {
    async fn hotels_near_airport(&self, request: &SearchRequest) -> Result<SearchResult> {
        request.validate()?;
        if request.airport_name != "London Heathrow" {
            return Ok(SearchResult::empty());
        }
        Ok(SearchResult {
            hotels: vec![hotel(json!({
                "name": "Bath Road Inn",
                "city": "London",
                "geo": {"lat": 51.481, "lon": -0.445, "accuracy": "ROOFTOP"},
                "reviews": [{"author": "Ana", "ratings": {"Overall": 4.5}}]
            }))],
            airport: Some(Airport {
                name: request.airport_name.clone(),
                location: Location {
                    lat: 51.4775,
                    lon: -0.461389,
                    accuracy: "APPROXIMATE".to_string(),
                },
            }),
        })
    }

    async fn hotels_in_city(&self, city: &str) -> Result<Vec<Hotel>> {
        match city {
            "broken" => Err(NearstayError::MalformedResponse("invalid JSON".into())),
            "offline" => Err(NearstayError::UpstreamStatus {
                status: 503,
                body: "node 10.0.0.7 overloaded".into(),
            }),
            "Windsor" => Ok(vec![hotel(json!({"name": "Castle View Windsor", "city": "Windsor"}))]),
            _ => Ok(Vec::new()),
        }
    }
}

async fn execute_with(root_config: &RootConfig, query: &str) -> Value {
    let schema = build_schema(HOTELS_GRAPHQL, root_config, Arc::new(FixtureResolver)).unwrap();
    let response = schema.execute(query).await;
    serde_json::to_value(&response).unwrap()
}

async fn execute(query: &str) -> Value {
    execute_with(&RootConfig::standard(), query).await
}

#[tokio::test]
async fn test_hotels_near_airport_resolves_nested_documents() {
    let body = execute(
        r#"{
            hotelsNearAirport(airportName: "London Heathrow", withinKm: 5) {
                airport { name location { lat lon accuracy } }
                hotels { name city geo { lat lon } reviews { author ratings { Overall } } }
            }
        }"#,
    )
    .await;

    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    assert_eq!(
        body["data"]["hotelsNearAirport"],
        json!({
            "airport": {
                "name": "London Heathrow",
                "location": {"lat": 51.4775, "lon": -0.461389, "accuracy": "APPROXIMATE"}
            },
            "hotels": [{
                "name": "Bath Road Inn",
                "city": "London",
                "geo": {"lat": 51.481, "lon": -0.445},
                "reviews": [{"author": "Ana", "ratings": {"Overall": 4.5}}]
            }]
        })
    );
}

#[tokio::test]
async fn test_missing_fields_resolve_to_null() {
    let body = execute(
        r#"{ hotelsNearAirport(airportName: "London Heathrow", withinKm: 5) { hotels { name phone } } }"#,
    )
    .await;
    assert_eq!(
        body["data"]["hotelsNearAirport"]["hotels"][0],
        json!({"name": "Bath Road Inn", "phone": null})
    );
}

#[tokio::test]
async fn test_no_match_gives_null_airport() {
    let body = execute(
        r#"{ hotelsNearAirport(airportName: "Atlantis", withinKm: 5) { airport { name } hotels { name } } }"#,
    )
    .await;
    assert_eq!(
        body["data"]["hotelsNearAirport"],
        json!({"airport": null, "hotels": []})
    );
}

#[tokio::test]
async fn test_invalid_radius_surfaces_error_code() {
    let body = execute(
        r#"{ hotelsNearAirport(airportName: "London Heathrow", withinKm: 0) { hotels { name } } }"#,
    )
    .await;
    assert_eq!(body["data"]["hotelsNearAirport"], Value::Null);
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("INVALID_INPUT"));
}

#[tokio::test]
async fn test_list_hotels_in_city() {
    let body = execute(r#"{ listHotelsInCity(city: "Windsor") { name city } }"#).await;
    assert_eq!(
        body["data"]["listHotelsInCity"],
        json!([{"name": "Castle View Windsor", "city": "Windsor"}])
    );
}

#[tokio::test]
async fn test_resolver_error_code_is_kept() {
    let body = execute(r#"{ listHotelsInCity(city: "broken") { name } }"#).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("MALFORMED_RESPONSE"));
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("invalid JSON"));
}

#[tokio::test]
async fn test_store_body_is_not_shown_to_callers() {
    let body = execute(r#"{ listHotelsInCity(city: "offline") { name } }"#).await;
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], json!("UPSTREAM_FAILURE"));
    let message = error["message"].as_str().unwrap();
    assert!(message.contains("503"));
    assert!(!message.contains("10.0.0.7"));
}

#[tokio::test]
async fn test_unbound_query_field_is_null() {
    let config = RootConfig::builder().near_airport("hotelsNearAirport").build();
    let body = execute_with(&config, r#"{ listHotelsInCity(city: "Windsor") { name } }"#).await;
    assert_eq!(body["data"]["listHotelsInCity"], Value::Null);
}

#[test]
fn test_invalid_sdl_is_rejected() {
    let result = build_schema("type Query {", &RootConfig::standard(), Arc::new(FixtureResolver));
    assert!(result.is_err());
}
