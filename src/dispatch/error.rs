use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchErrorKind {
    UnknownItem,
    InvalidCandidate,
    AlreadyDispatched,
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchError {
    pub kind: DispatchErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True for conditions the operator can simply be shown again; false for
    /// caller integrity violations.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind, DispatchErrorKind::AlreadyDispatched)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DispatchError {}

pub fn unknown_item(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::UnknownItem, message)
}

pub fn invalid_candidate(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::InvalidCandidate, message)
}

pub fn already_dispatched(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::AlreadyDispatched, message)
}

pub fn invariant_violation(message: impl Into<String>) -> DispatchError {
    DispatchError::new(DispatchErrorKind::InvariantViolation, message)
}
