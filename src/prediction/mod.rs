pub mod client;
pub mod decode;
pub mod error;
pub mod types;

pub use client::{HttpPredictionClient, PredictionBackend, fetch_spoilage_overview};
pub use error::{PredictionError, PredictionErrorKind};
pub use types::{
    DemandForecast, DemandPoint, OverviewEntry, PredictionServiceConfig, RiskPoint, ServiceHealth,
    SpoilageOutlook,
};
