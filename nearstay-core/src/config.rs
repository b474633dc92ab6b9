use crate::HotelResolver;
use std::sync::Arc;

/// Resolver operation a GraphQL query field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    HotelsNearAirport,
    HotelsInCity,
}

#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub name: String,
    pub operation: Operation,
}

#[derive(Debug, Clone, Default)]
pub struct RootConfig {
    pub queries: Vec<QueryConfig>,
}

impl RootConfig {
    pub fn builder() -> RootConfigBuilder {
        RootConfigBuilder::default()
    }

    /// Binding used by the shipped schema: `hotelsNearAirport` and `listHotelsInCity`.
    pub fn standard() -> Self {
        Self::builder()
            .near_airport("hotelsNearAirport")
            .in_city("listHotelsInCity")
            .build()
    }

    pub fn get_operation(&self, query_name: &str) -> Option<Operation> {
        self.queries
            .iter()
            .find(|q| q.name == query_name)
            .map(|q| q.operation)
    }
}

#[derive(Default)]
pub struct RootConfigBuilder {
    config: RootConfig,
}

impl RootConfigBuilder {
    pub fn near_airport(mut self, name: impl Into<String>) -> Self {
        self.config.queries.push(QueryConfig {
            name: name.into(),
            operation: Operation::HotelsNearAirport,
        });
        self
    }

    pub fn in_city(mut self, name: impl Into<String>) -> Self {
        self.config.queries.push(QueryConfig {
            name: name.into(),
            operation: Operation::HotelsInCity,
        });
        self
    }

    pub fn build(self) -> RootConfig {
        self.config
    }
}

pub struct GraphletteConfig {
    pub path: String,
    pub schema_text: String,
    pub root_config: RootConfig,
    pub resolver: Arc<dyn HotelResolver>,
}

pub struct ServerConfig {
    pub port: u16,
    pub graphlettes: Vec<GraphletteConfig>,
}
