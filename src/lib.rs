// Library for tests to access modules

pub mod aggregator;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod sysinfo_repo;
pub mod version;
