use nearstay_core::{
    Airport, Hotel, Location, NearstayError, Result, SearchResult, Stash, DEFAULT_ACCURACY,
};
use serde_json::Value;

use crate::query::JOIN_FIELDS;

/// Raw text, then at most one more layer of JSON-in-a-string.
const MAX_DECODE_DEPTH: usize = 2;

/// Shape a hotels-near-airport response.
///
/// The airport is rebuilt from `airport_name` and the join fields of the first
/// row; every row shares them. No rows means `airport` is `None`.
pub fn shape_response(body: Value, airport_name: &str) -> Result<SearchResult> {
    let rows = extract_rows(body)?;

    let Some(first) = rows.first() else {
        return Ok(SearchResult::empty());
    };
    let airport = Airport {
        name: airport_name.to_string(),
        location: extract_location(first)?,
    };

    Ok(SearchResult {
        hotels: rows.into_iter().map(clean_hotel).collect(),
        airport: Some(airport),
    })
}

/// Shape a hotels-in-city response.
pub fn shape_city_response(body: Value) -> Result<Vec<Hotel>> {
    Ok(extract_rows(body)?.into_iter().map(clean_hotel).collect())
}

fn decode_body(mut body: Value) -> Result<Value> {
    for _ in 0..MAX_DECODE_DEPTH {
        match body {
            Value::String(text) => {
                body = serde_json::from_str(&text)
                    .map_err(|e| NearstayError::MalformedResponse(format!("invalid JSON: {e}")))?;
            }
            other => return Ok(other),
        }
    }
    match body {
        Value::String(_) => Err(NearstayError::MalformedResponse(
            "body is a JSON string nested too deeply".to_string(),
        )),
        other => Ok(other),
    }
}

/// Pull the `results` rows out of a query service body.
fn extract_rows(body: Value) -> Result<Vec<Stash>> {
    let Value::Object(mut body) = decode_body(body)? else {
        return Err(NearstayError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    };

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| match e.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => e.to_string(),
                })
                .collect();
            return Err(NearstayError::Upstream(messages.join("; ")));
        }
    }

    let Some(Value::Array(results)) = body.remove("results") else {
        return Err(NearstayError::MalformedResponse(
            "missing results array".to_string(),
        ));
    };

    results
        .into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(doc) => Ok(doc),
            other => Err(NearstayError::MalformedResponse(format!(
                "row {i} is not an object: {other}"
            ))),
        })
        .collect()
}

fn extract_location(row: &Stash) -> Result<Location> {
    let coordinate = |field: &str| {
        row.get(field).and_then(Value::as_f64).ok_or_else(|| {
            NearstayError::MalformedResponse(format!("first row has no numeric {field}"))
        })
    };

    Ok(Location {
        lat: coordinate("alat")?,
        lon: coordinate("alon")?,
        accuracy: row
            .get("accuracy")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ACCURACY)
            .to_string(),
    })
}

fn clean_hotel(mut row: Stash) -> Hotel {
    for field in JOIN_FIELDS {
        row.remove(field);
    }
    row
}
