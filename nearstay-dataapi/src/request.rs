use nearstay_core::{NearstayError, Result, SearchRequest};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::DataApiConfig;
use crate::query::{HOTELS_IN_CITY, HOTELS_NEAR_AIRPORT, QUERY_SERVICE_PATH};

/// JSON body accepted by the query service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryBody {
    pub query_context: String,
    pub statement: String,
    pub args: Vec<Value>,
    pub timeout: String,
}

/// A fully built, not yet dispatched, query service call.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: QueryBody,
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Turns searches into query service requests.
///
/// Credentials are encoded once at construction; building a request has no
/// side effects.
#[derive(Clone)]
pub struct RequestBuilder {
    authorization: String,
    query_context: String,
    timeout: String,
}

impl RequestBuilder {
    pub fn new(config: &DataApiConfig) -> Self {
        Self {
            authorization: config.credentials.basic_authorization(),
            query_context: config.query_context.clone(),
            timeout: config.timeout_param(),
        }
    }

    pub fn build_request(&self, request: &SearchRequest) -> Result<HttpRequest> {
        request.validate()?;
        Ok(self.envelope(
            HOTELS_NEAR_AIRPORT,
            vec![json!(request.airport_name), json!(request.within_km)],
        ))
    }

    pub fn build_city_request(&self, city: &str) -> Result<HttpRequest> {
        if city.trim().is_empty() {
            return Err(NearstayError::InvalidInput(
                "city must not be empty".to_string(),
            ));
        }
        Ok(self.envelope(HOTELS_IN_CITY, vec![json!(city)]))
    }

    fn envelope(&self, statement: &str, args: Vec<Value>) -> HttpRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), self.authorization.clone());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        HttpRequest {
            method: Method::POST,
            path: QUERY_SERVICE_PATH.to_string(),
            headers,
            body: QueryBody {
                query_context: self.query_context.clone(),
                statement: statement.to_string(),
                args,
                timeout: self.timeout.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearstay_core::Credentials;

    fn builder() -> RequestBuilder {
        let config = DataApiConfig::new(
            "https://example.data.cloud.couchbase.com",
            Credentials::new("Administrator", "password"),
        )
        .unwrap();
        RequestBuilder::new(&config)
    }

    #[test]
    fn test_build_request_envelope() {
        let req = builder()
            .build_request(&SearchRequest::new("London Heathrow", 10))
            .unwrap();

        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/_p/query/query/service");
        assert_eq!(
            req.headers["Authorization"],
            "Basic QWRtaW5pc3RyYXRvcjpwYXNzd29yZA=="
        );
        assert_eq!(req.headers["Content-Type"], "application/json");
        assert_eq!(req.headers["Accept"], "application/json");
        assert_eq!(req.body.statement, HOTELS_NEAR_AIRPORT);
        assert_eq!(req.body.args, vec![json!("London Heathrow"), json!(10)]);
        assert_eq!(req.body.query_context, "default:`travel-sample`.`inventory`");
        assert_eq!(req.body.timeout, "10000ms");
    }

    #[test]
    fn test_body_serializes_to_wire_format() {
        let req = builder()
            .build_request(&SearchRequest::new("Gatwick", 3))
            .unwrap();
        let wire = serde_json::to_value(&req.body).unwrap();
        assert_eq!(wire["args"], json!(["Gatwick", 3]));
        assert!(wire.get("statement").is_some());
        assert!(wire.get("query_context").is_some());
        assert!(wire.get("timeout").is_some());
        assert!(!wire.to_string().contains("password"));
    }

    #[test]
    fn test_airport_name_is_never_interpolated() {
        let hostile = "x' OR 1=1 --";
        let req = builder()
            .build_request(&SearchRequest::new(hostile, 10))
            .unwrap();
        assert!(!req.body.statement.contains(hostile));
        assert_eq!(req.body.args[0], json!(hostile));
    }

    #[test]
    fn test_invalid_radius_fails_before_building() {
        for km in [0, -5] {
            let err = builder()
                .build_request(&SearchRequest::new("Gatwick", km))
                .unwrap_err();
            assert!(matches!(err, NearstayError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_empty_airport_name_fails() {
        let err = builder()
            .build_request(&SearchRequest::new("", 10))
            .unwrap_err();
        assert!(matches!(err, NearstayError::InvalidInput(_)));
    }

    #[test]
    fn test_city_request_is_parameterized() {
        let req = builder().build_city_request("San Francisco").unwrap();
        assert_eq!(req.body.statement, HOTELS_IN_CITY);
        assert_eq!(req.body.args, vec![json!("San Francisco")]);
        assert!(!req.body.statement.contains("San Francisco"));
    }

    #[test]
    fn test_blank_city_fails() {
        let err = builder().build_city_request("  ").unwrap_err();
        assert!(matches!(err, NearstayError::InvalidInput(_)));
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let req = builder()
            .build_request(&SearchRequest::new("Gatwick", 3))
            .unwrap();
        let printed = format!("{:?}", req);
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("QWRtaW5pc3RyYXRvcjpwYXNzd29yZA=="));
    }
}
