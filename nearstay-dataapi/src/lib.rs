pub mod client;
pub mod config;
pub mod query;
pub mod request;
pub mod resolver;
pub mod shaper;

pub use client::DataApiClient;
pub use config::DataApiConfig;
pub use request::{HttpRequest, QueryBody, RequestBuilder};
pub use resolver::DataApiResolver;
pub use shaper::{shape_city_response, shape_response};
