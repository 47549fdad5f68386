pub mod handlers;
pub mod service;

pub use service::{WeatherError, WeatherService, WeatherSnapshot};
