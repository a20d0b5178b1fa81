use std::fmt;

use crate::dispatch::types::{InventoryItem, RecipientCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError {
    pub message: String,
}

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NotifyError {}

/// External collaborator invoked after a dispatch commits, e.g. notifying the
/// recipient organization. A failure here never rolls back the committed
/// dispatch; it is reported separately.
pub trait DispatchNotifierPort: Send + Sync {
    fn notify(
        &self,
        item: &InventoryItem,
        candidate: &RecipientCandidate,
    ) -> Result<(), NotifyError>;
}
