/// Query service endpoint, relative to the Data API base URL.
pub const QUERY_SERVICE_PATH: &str = "/_p/query/query/service";

/// Fields the airport join attaches to every hotel row.
pub const JOIN_FIELDS: [&str; 3] = ["alat", "alon", "accuracy"];

/// Hotels within `$2` km of the airport named `$1`.
///
/// `airport_loc` pins a single airport; when nothing matches it is empty and the
/// `alat IS NOT MISSING` guard drops every hotel. Distance is planar on
/// (lat, lon) at [`nearstay_core::KM_PER_DEGREE`], the same check as
/// [`nearstay_core::within_radius`], so it stretches with latitude and is only
/// meant for short radii.
pub const HOTELS_NEAR_AIRPORT: &str = "\
WITH airport_loc AS (
    SELECT a.geo.lat AS alat, a.geo.lon AS alon, a.geo.accuracy AS accuracy
    FROM airport AS a
    WHERE a.airportname = $1
    LIMIT 1
)
SELECT h.*, al.alat, al.alon, al.accuracy
FROM hotel AS h
JOIN airport_loc AS al ON al.alat IS NOT MISSING
WHERE al.alat IS NOT MISSING
    AND POWER(h.geo.lat - al.alat, 2) + POWER(h.geo.lon - al.alon, 2) <= POWER($2 / 111, 2)";

/// Hotels whose `city` equals `$1`.
pub const HOTELS_IN_CITY: &str = "SELECT h.* FROM hotel AS h WHERE h.city = $1";

#[cfg(test)]
mod tests {
    use super::*;
    use nearstay_core::KM_PER_DEGREE;

    #[test]
    fn test_statement_is_parameterized() {
        assert!(HOTELS_NEAR_AIRPORT.contains("a.airportname = $1"));
        assert!(HOTELS_NEAR_AIRPORT.contains("POWER($2 / 111, 2)"));
        assert!(HOTELS_NEAR_AIRPORT.contains("WITH airport_loc AS"));
        assert!(HOTELS_NEAR_AIRPORT.contains("IS NOT MISSING"));
        assert!(HOTELS_IN_CITY.ends_with("h.city = $1"));
    }

    #[test]
    fn test_statement_constant_matches_local_predicate() {
        assert!(HOTELS_NEAR_AIRPORT.contains(&format!("/ {}", KM_PER_DEGREE as i64)));
    }
}
