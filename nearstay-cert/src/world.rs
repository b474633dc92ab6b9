use cucumber::World;
use nearstay_core::{Hotel, HotelResolver, NearstayError, SearchResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::stub_store::StubDataApi;

struct DebugResolver(Arc<dyn HotelResolver>);
impl fmt::Debug for DebugResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HotelResolver")
    }
}

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct CertWorld {
    resolver_inner: Option<DebugResolver>,
    stub_inner: Option<StubDataApi>,

    pub last_result: Option<SearchResult>,
    pub results_by_radius: HashMap<i64, SearchResult>,
    pub city_hotels: Option<Vec<Hotel>>,
    pub last_error: Option<NearstayError>,
}

impl CertWorld {
    pub fn new() -> Self {
        Self {
            resolver_inner: None,
            stub_inner: None,
            last_result: None,
            results_by_radius: HashMap::new(),
            city_hotels: None,
            last_error: None,
        }
    }

    pub fn set_resolver(&mut self, resolver: Arc<dyn HotelResolver>) {
        self.resolver_inner = Some(DebugResolver(resolver));
    }

    pub fn set_stub(&mut self, stub: StubDataApi) {
        self.stub_inner = Some(stub);
    }

    pub fn resolver(&self) -> &dyn HotelResolver {
        self.resolver_inner
            .as_ref()
            .expect("resolver not initialized")
            .0
            .as_ref()
    }

    pub fn stub(&self) -> &StubDataApi {
        self.stub_inner.as_ref().expect("stub data store not initialized")
    }

    pub fn result(&self) -> &SearchResult {
        match (&self.last_result, &self.last_error) {
            (Some(result), _) => result,
            (None, Some(err)) => panic!("search failed: {err}"),
            (None, None) => panic!("no search has run"),
        }
    }

    pub fn hotel_names(hotels: &[Hotel]) -> Vec<String> {
        let mut names: Vec<String> = hotels
            .iter()
            .filter_map(|h| h.get("name").and_then(|v| v.as_str()))
            .map(String::from)
            .collect();
        names.sort();
        names
    }
}
