use cucumber::World as _;
#[allow(unused_imports)]
use nearstay_cert::steps::{in_city, near_airport, store};
use nearstay_cert::{CertWorld, StubDataApi};
use nearstay_core::Credentials;
use nearstay_dataapi::{DataApiConfig, DataApiResolver};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    CertWorld::cucumber()
        .max_concurrent_scenarios(1)
        .before(move |_feature, _rule, _scenario, world| {
            Box::pin(async move {
                let credentials = Credentials::new("Administrator", "password");
                let stub = StubDataApi::new(&credentials);
                let base_url = stub.start().await;

                let config = DataApiConfig::new(&base_url, credentials)
                    .expect("invalid stub URL")
                    // Short enough that the transport gives up before slow mode answers.
                    .with_query_timeout(Duration::from_secs(2));
                let resolver = DataApiResolver::new(&config).expect("failed to build resolver");

                world.set_stub(stub);
                world.set_resolver(Arc::new(resolver));
            })
        })
        .run_and_exit("../nearstay-cert/tests/features")
        .await;
}
