use crate::dispatch::{
    ports::{DispatchNotifierPort, NotifyError},
    types::{InventoryItem, RecipientCandidate},
};

#[derive(Debug, Clone, Default)]
pub struct NoopDispatchNotifier;

impl DispatchNotifierPort for NoopDispatchNotifier {
    fn notify(
        &self,
        _item: &InventoryItem,
        _candidate: &RecipientCandidate,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
