//! Account-data providers. Each client swallows its own transport errors
//! and reports "no data", so the resolver's fallback logic stays total.

pub mod api;
pub mod scrape;

pub use api::ApiClient;
pub use scrape::ScrapeClient;
