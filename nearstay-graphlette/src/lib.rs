mod schema_builder;

pub use schema_builder::{build_schema, GraphletteRouter};

/// Schema shipped with the server and Lambda binaries.
pub const HOTELS_GRAPHQL: &str = include_str!("../config/hotels.graphql");
