pub mod in_city;
pub mod near_airport;
pub mod store;
