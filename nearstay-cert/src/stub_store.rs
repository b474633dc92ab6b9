use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use nearstay_core::{within_radius, Credentials};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Delay used by `slow` mode; longer than any transport timeout the cert runner sets.
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(8);

/// How the stub answers the next query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    /// Evaluate the statement against the fixtures.
    Normal,
    /// Evaluate, then send the JSON document as a JSON string.
    StringEncoded,
    /// 200 with a body that is not JSON.
    Malformed,
    /// 200 with a query service `errors` array.
    StoreError,
    /// 503, as from an overloaded or unreachable cluster.
    Unavailable,
    /// Hold the response for longer than the given delay; the resolver's
    /// transport timeout must be shorter.
    Slow(Duration),
}

impl std::str::FromStr for StubMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(StubMode::Normal),
            "string-encoded" => Ok(StubMode::StringEncoded),
            "malformed" => Ok(StubMode::Malformed),
            "error" => Ok(StubMode::StoreError),
            "unavailable" => Ok(StubMode::Unavailable),
            "slow" => Ok(StubMode::Slow(SLOW_RESPONSE_DELAY)),
            other => Err(format!("unknown stub mode: {other}")),
        }
    }
}

#[derive(Debug)]
struct StubState {
    authorization: Mutex<String>,
    mode: Mutex<StubMode>,
    calls: AtomicUsize,
    airports: Vec<Value>,
    hotels: Vec<Value>,
}

/// In-process stand-in for the Data API query service.
///
/// Understands the two statements the resolver sends, telling them apart by
/// argument count, and evaluates them over a small airport/hotel fixture set.
#[derive(Debug, Clone)]
pub struct StubDataApi {
    state: Arc<StubState>,
}

impl StubDataApi {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            state: Arc::new(StubState {
                authorization: Mutex::new(credentials.basic_authorization()),
                mode: Mutex::new(StubMode::Normal),
                calls: AtomicUsize::new(0),
                airports: fixture_airports(),
                hotels: fixture_hotels(),
            }),
        }
    }

    pub fn set_mode(&self, mode: StubMode) {
        *self.state.mode.lock().unwrap() = mode;
    }

    pub fn set_credentials(&self, credentials: &Credentials) {
        *self.state.authorization.lock().unwrap() = credentials.basic_authorization();
    }

    /// Number of fixture airports and hotels served.
    pub fn fixture_counts(&self) -> (usize, usize) {
        (self.state.airports.len(), self.state.hotels.len())
    }

    /// Number of authorized queries received so far.
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral local port and return the base URL.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/_p/query/query/service", post(query_service))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{}", addr.port())
    }

    fn hotels_near_airport(&self, airport_name: &str, within_km: f64) -> Vec<Value> {
        let Some(airport) = self
            .state
            .airports
            .iter()
            .find(|a| a["airportname"] == airport_name)
        else {
            return Vec::new();
        };
        let (Some(alat), Some(alon)) = (
            airport["geo"]["lat"].as_f64(),
            airport["geo"]["lon"].as_f64(),
        ) else {
            return Vec::new();
        };

        self.state
            .hotels
            .iter()
            .filter_map(|hotel| {
                let lat = hotel["geo"]["lat"].as_f64()?;
                let lon = hotel["geo"]["lon"].as_f64()?;
                if !within_radius((lat, lon), (alat, alon), within_km) {
                    return None;
                }
                let mut row = hotel.as_object()?.clone();
                row.insert("alat".to_string(), json!(alat));
                row.insert("alon".to_string(), json!(alon));
                if let Some(accuracy) = airport["geo"].get("accuracy") {
                    row.insert("accuracy".to_string(), accuracy.clone());
                }
                Some(Value::Object(row))
            })
            .collect()
    }

    fn hotels_in_city(&self, city: &str) -> Vec<Value> {
        self.state
            .hotels
            .iter()
            .filter(|h| h["city"] == city)
            .cloned()
            .collect()
    }
}

async fn query_service(
    State(stub): State<StubDataApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let expected = stub.state.authorization.lock().unwrap().clone();
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if presented != expected {
        let errors = json!({
            "status": "fatal",
            "errors": [{"code": 10000, "msg": "Authentication failure"}]
        });
        return (StatusCode::UNAUTHORIZED, Json(errors)).into_response();
    }

    stub.state.calls.fetch_add(1, Ordering::SeqCst);
    let mode = *stub.state.mode.lock().unwrap();
    debug!("stub query service call in {:?} mode", mode);

    match mode {
        StubMode::Unavailable => {
            return (StatusCode::SERVICE_UNAVAILABLE, "service unavailable").into_response()
        }
        StubMode::Malformed => {
            return (StatusCode::OK, "<html><body>gateway hiccup</body></html>").into_response()
        }
        StubMode::StoreError => {
            let errors = json!({
                "status": "fatal",
                "errors": [{"code": 3000, "msg": "syntax error - line 1, column 1"}]
            });
            return (StatusCode::OK, Json(errors)).into_response();
        }
        StubMode::Slow(delay) => tokio::time::sleep(delay).await,
        StubMode::Normal | StubMode::StringEncoded => {}
    }

    let args = body["args"].as_array().cloned().unwrap_or_default();
    let results = match args.as_slice() {
        [Value::String(name), km] => stub.hotels_near_airport(name, km.as_f64().unwrap_or(0.0)),
        [Value::String(city)] => stub.hotels_in_city(city),
        _ => Vec::new(),
    };
    let document = json!({
        "requestID": "5f2e5c4a-stub",
        "signature": {"*": "*"},
        "results": results,
        "status": "success",
        "metrics": {"resultCount": results.len()}
    });

    if mode == StubMode::StringEncoded {
        let encoded = Value::String(document.to_string());
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            encoded.to_string(),
        )
            .into_response();
    }
    (StatusCode::OK, Json(document)).into_response()
}

/// Airports keyed by `airportname`; only Gatwick reports an accuracy.
fn fixture_airports() -> Vec<Value> {
    vec![
        json!({"id": 507, "type": "airport", "airportname": "London Heathrow",
               "city": "London", "faa": "LHR",
               "geo": {"lat": 51.4775, "lon": -0.461389, "alt": 83}}),
        json!({"id": 508, "type": "airport", "airportname": "Gatwick",
               "city": "London", "faa": "LGW",
               "geo": {"lat": 51.148056, "lon": -0.190278, "alt": 202, "accuracy": "RING"}}),
        json!({"id": 1590, "type": "airport", "airportname": "Grimsey",
               "city": "Grimsey", "faa": "GRY",
               "geo": {"lat": 66.5458, "lon": -18.0173, "alt": 66}}),
        json!({"id": 531, "type": "airport", "airportname": "Sumburgh",
               "city": "Sumburgh", "faa": "LSI",
               "geo": {"lat": 59.8789, "lon": -1.2956, "alt": 20}}),
    ]
}

/// Approximate distances from Heathrow: Bath Road 1.9 km, Hounslow 11 km,
/// Windsor 16 km, Paddington 32 km, Crawley 50 km (3.3 km from Gatwick).
/// Sumburgh Head Lodge sits exactly 0.01 degrees north of Sumburgh airport.
fn fixture_hotels() -> Vec<Value> {
    vec![
        json!({"id": 10025, "type": "hotel", "name": "Bath Road Inn", "city": "London",
               "country": "United Kingdom", "price": "£95",
               "geo": {"lat": 51.4810, "lon": -0.4450, "accuracy": "ROOFTOP"},
               "reviews": [{"ratings": {"Overall": 4}}]}),
        json!({"id": 10026, "type": "hotel", "name": "Hounslow Lodge", "city": "Hounslow",
               "country": "United Kingdom",
               "geo": {"lat": 51.4680, "lon": -0.3610, "accuracy": "RANGE_INTERPOLATED"},
               "reviews": []}),
        json!({"id": 10027, "type": "hotel", "name": "Castle View Windsor", "city": "Windsor",
               "country": "United Kingdom",
               "geo": {"lat": 51.4839, "lon": -0.6044, "accuracy": "ROOFTOP"},
               "reviews": [{"ratings": {"Overall": 5}}, {"ratings": {"Overall": 3}}]}),
        json!({"id": 10028, "type": "hotel", "name": "Paddington Rooms", "city": "London",
               "country": "United Kingdom",
               "geo": {"lat": 51.5154, "lon": -0.1755, "accuracy": "ROOFTOP"}}),
        json!({"id": 10029, "type": "hotel", "name": "Crawley Manor", "city": "Crawley",
               "country": "United Kingdom",
               "geo": {"lat": 51.1190, "lon": -0.1870, "accuracy": "APPROXIMATE"}}),
        json!({"id": 10030, "type": "hotel", "name": "Mystery Guesthouse", "city": "London",
               "country": "United Kingdom"}),
        json!({"id": 10031, "type": "hotel", "name": "Sumburgh Head Lodge", "city": "Sumburgh",
               "country": "United Kingdom",
               "geo": {"lat": 59.8889, "lon": -1.2956, "accuracy": "ROOFTOP"}}),
    ]
}
