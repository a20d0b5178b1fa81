use serde::{Deserialize, Serialize};

use crate::{
    dispatch::{DispatchErrorKind, DispatchStatus, StoreLocation},
    prediction::{DemandForecast, OverviewEntry, PredictionError, ServiceHealth, SpoilageOutlook},
    session::DispatchReceipt,
    view::RouteCardView,
};

/// Commands the presentation adapter accepts on stdin, one JSON object per
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Refresh,
    Routes,
    Status {
        item_id: String,
    },
    Dispatch {
        item_id: String,
        recipient_id: String,
    },
    Demand {
        product_id: String,
    },
    Spoilage {
        product_id: String,
        #[serde(default)]
        date: Option<String>,
    },
    Overview,
    Health,
    Exit,
}

/// Reply events written to stdout, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Ready {
        run_id: String,
    },
    RefreshStarted {
        ticket: u64,
    },
    RefreshInstalled {
        ticket: u64,
        item_count: usize,
    },
    RefreshFailed {
        ticket: u64,
        error: PredictionError,
    },
    Routes {
        store_location: Option<StoreLocation>,
        refresh_in_flight: bool,
        cards: Vec<RouteCardView>,
    },
    Status {
        item_id: String,
        status: DispatchStatus,
    },
    Dispatched {
        receipt: DispatchReceipt,
    },
    DispatchRejected {
        kind: DispatchErrorKind,
        message: String,
    },
    Demand {
        forecast: DemandForecast,
    },
    Spoilage {
        outlook: SpoilageOutlook,
    },
    Overview {
        entries: Vec<OverviewEntry>,
    },
    Health {
        health: ServiceHealth,
    },
    PredictionFailed {
        error: PredictionError,
    },
    ProtocolError {
        message: String,
    },
    Exiting,
}

pub fn parse_client_message(line: &str) -> Result<ClientMessage, serde_json::Error> {
    serde_json::from_str(line)
}

pub fn encode_server_message(message: &ServerMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}
