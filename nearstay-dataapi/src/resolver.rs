use async_trait::async_trait;
use nearstay_core::{Hotel, HotelResolver, Result, SearchRequest, SearchResult};
use std::sync::Arc;
use tracing::debug;

use crate::client::DataApiClient;
use crate::config::DataApiConfig;
use crate::request::RequestBuilder;
use crate::shaper::{shape_city_response, shape_response};

pub struct DataApiResolver {
    client: Arc<DataApiClient>,
    builder: RequestBuilder,
}

impl DataApiResolver {
    pub fn new(config: &DataApiConfig) -> Result<Self> {
        let client = Arc::new(DataApiClient::new(config)?);
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Arc<DataApiClient>, config: &DataApiConfig) -> Self {
        Self {
            client,
            builder: RequestBuilder::new(config),
        }
    }
}

#[async_trait]
impl HotelResolver for DataApiResolver {
    async fn hotels_near_airport(&self, request: &SearchRequest) -> Result<SearchResult> {
        let http_request = self.builder.build_request(request)?;
        let body = self.client.send(&http_request).await?;
        let result = shape_response(body, &request.airport_name)?;

        if result.airport.is_none() {
            // Unknown airport and empty radius look the same from here.
            debug!(
                "No hotels within {} km of {:?}",
                request.within_km, request.airport_name
            );
        } else {
            debug!(
                "Found {} hotels within {} km of {:?}",
                result.hotels.len(),
                request.within_km,
                request.airport_name
            );
        }
        Ok(result)
    }

    async fn hotels_in_city(&self, city: &str) -> Result<Vec<Hotel>> {
        let http_request = self.builder.build_city_request(city)?;
        let body = self.client.send(&http_request).await?;
        let hotels = shape_city_response(body)?;
        debug!("Found {} hotels in {:?}", hotels.len(), city);
        Ok(hotels)
    }
}
