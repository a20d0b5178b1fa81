use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionErrorKind {
    /// Transport failure, timeout, or a non-success status without a
    /// service-reported error body.
    ServiceUnavailable,
    /// Payload fails schema expectations: missing fields, wrong types,
    /// out-of-range scores or distances.
    InvalidResponse,
    /// Service-reported error body for a product it has no model for.
    UnknownProduct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionError {
    pub kind: PredictionErrorKind,
    pub message: String,
    pub retryable: bool,
    pub http_status: Option<u16>,
}

impl PredictionError {
    pub fn new(kind: PredictionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: matches!(kind, PredictionErrorKind::ServiceUnavailable),
            http_status: None,
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "{} (status={})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for PredictionError {}

pub fn service_unavailable(message: impl Into<String>) -> PredictionError {
    PredictionError::new(PredictionErrorKind::ServiceUnavailable, message)
}

pub fn invalid_response(message: impl Into<String>) -> PredictionError {
    PredictionError::new(PredictionErrorKind::InvalidResponse, message)
}

pub fn unknown_product(message: impl Into<String>) -> PredictionError {
    PredictionError::new(PredictionErrorKind::UnknownProduct, message)
}
