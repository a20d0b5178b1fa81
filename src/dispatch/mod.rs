pub mod coordinator;
pub mod error;
pub mod noop;
pub mod ports;
pub mod recommendation;
pub mod types;

pub use coordinator::DispatchCoordinator;
pub use error::{DispatchError, DispatchErrorKind};
pub use noop::NoopDispatchNotifier;
pub use ports::{DispatchNotifierPort, NotifyError};
pub use recommendation::{DuplicateItemId, RecommendationSet};
pub use types::{
    DispatchStatus, InventoryItem, ItemId, RecipientCandidate, RecipientId, StoreLocation,
};
