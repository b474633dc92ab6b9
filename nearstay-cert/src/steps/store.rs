use cucumber::{given, then};
use nearstay_core::Credentials;

use crate::stub_store::StubMode;
use crate::world::CertWorld;

#[given("the data store holds the airport and hotel fixtures")]
async fn store_seeded(world: &mut CertWorld) {
    let (airports, hotels) = world.stub().fixture_counts();
    assert!(airports > 0, "stub started without airports");
    assert!(hotels > 0, "stub started without hotels");
    assert_eq!(world.stub().calls(), 0, "stub already answered queries");
}

#[given(regex = r#"^the data store answers with (normal|string-encoded|malformed|error|unavailable|slow) responses$"#)]
async fn store_mode(world: &mut CertWorld, mode: StubMode) {
    world.stub().set_mode(mode);
}

#[given(regex = r#"^the data store only accepts user "([^"]+)" with password "([^"]+)"$"#)]
async fn store_credentials(world: &mut CertWorld, username: String, password: String) {
    world
        .stub()
        .set_credentials(&Credentials::new(username, password));
}

#[then(regex = r#"^the data store received (\d+) quer(?:y|ies)$"#)]
async fn store_calls(world: &mut CertWorld, expected: usize) {
    assert_eq!(world.stub().calls(), expected);
}

#[then(regex = r#"^the call fails with code "([A-Z_]+)"$"#)]
async fn call_fails(world: &mut CertWorld, code: String) {
    let err = world
        .last_error
        .as_ref()
        .expect("expected the call to fail");
    assert_eq!(err.code(), code, "unexpected error: {err}");
}
