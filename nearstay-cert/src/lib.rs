pub mod steps;
pub mod stub_store;
pub mod world;

pub use stub_store::{StubDataApi, StubMode};
pub use world::CertWorld;
