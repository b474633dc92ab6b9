pub mod auth;
pub mod config;
pub mod distance;
pub mod error;

pub use auth::Credentials;
pub use config::{
    GraphletteConfig, Operation, QueryConfig, RootConfig, RootConfigBuilder, ServerConfig,
};
pub use distance::{within_radius, KM_PER_DEGREE};
pub use error::{NearstayError, Result};

use serde::{Deserialize, Serialize};

pub type Stash = serde_json::Map<String, serde_json::Value>;

/// A hotel document as stored, minus any join fields added by the query.
pub type Hotel = Stash;

/// Accuracy label used when the store does not report one.
pub const DEFAULT_ACCURACY: &str = "APPROXIMATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub airport_name: String,
    pub within_km: i64,
}

impl SearchRequest {
    pub fn new(airport_name: impl Into<String>, within_km: i64) -> Self {
        Self {
            airport_name: airport_name.into(),
            within_km,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.airport_name.trim().is_empty() {
            return Err(NearstayError::InvalidInput(
                "airportName must not be empty".to_string(),
            ));
        }
        if self.within_km <= 0 {
            return Err(NearstayError::InvalidInput(format!(
                "withinKm must be positive, got {}",
                self.within_km
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub accuracy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub location: Location,
}

/// Hotels within the radius plus the resolved airport.
///
/// `airport` is `None` whenever the store returned no rows. That covers both an
/// unknown airport and a known airport with nothing in range; the two cannot be
/// told apart from the query result alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hotels: Vec<Hotel>,
    pub airport: Option<Airport>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self {
            hotels: Vec::new(),
            airport: None,
        }
    }
}

#[async_trait::async_trait]
pub trait HotelResolver: Send + Sync {
    async fn hotels_near_airport(&self, request: &SearchRequest) -> Result<SearchResult>;
    async fn hotels_in_city(&self, city: &str) -> Result<Vec<Hotel>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case() {
        let req: SearchRequest =
            serde_json::from_value(json!({"airportName": "Gatwick", "withinKm": 5})).unwrap();
        assert_eq!(req, SearchRequest::new("Gatwick", 5));
    }

    #[test]
    fn test_validate_rejects_non_positive_radius() {
        for km in [0, -1, i64::MIN] {
            let err = SearchRequest::new("Gatwick", km).validate().unwrap_err();
            assert!(matches!(err, NearstayError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = SearchRequest::new("   ", 10).validate().unwrap_err();
        assert!(matches!(err, NearstayError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_accepts_large_radius() {
        assert!(SearchRequest::new("Gatwick", 100_000).validate().is_ok());
    }

    #[test]
    fn test_empty_result_serializes_null_airport() {
        let value = serde_json::to_value(SearchResult::empty()).unwrap();
        assert_eq!(value, json!({"hotels": [], "airport": null}));
    }
}
