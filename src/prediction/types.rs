use serde::{Deserialize, Serialize};

use crate::prediction::error::PredictionError;

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub date: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub product_id: String,
    pub total_demand: u64,
    pub points: Vec<DemandPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub date: String,
    pub risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoilageOutlook {
    pub product_id: String,
    pub avg_risk: f64,
    pub points: Vec<RiskPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub models_available: bool,
    pub demand_models_found: Vec<String>,
}

/// One row of the dashboard spoilage sweep. Per-product failures are carried
/// alongside successes so one missing model does not sink the whole overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewEntry {
    pub product_id: String,
    pub outlook: Option<SpoilageOutlook>,
    pub error: Option<PredictionError>,
}
