pub mod forecast_service;
pub mod query_service;

pub use forecast_service::{Forecast, ForecastService};
pub use query_service::QueryService;
