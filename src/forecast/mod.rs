pub mod handlers;
pub mod models;
pub mod service;

pub use models::ForecastEntry;
pub use service::{midday_entries, ForecastError, ForecastService};
