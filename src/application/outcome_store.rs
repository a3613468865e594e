use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::outcome::TransactionOutcome;

/// Ties a settlement attempt to the checkout generation it started under.
/// Issued when the attempt begins; a publish through a stale ticket is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptTicket(u64);

#[derive(Debug, Default)]
struct Slot {
    outcome: Option<TransactionOutcome>,
    epoch: u64,
}

/// Single-slot store for the most recent transaction outcome.
///
/// Written only by the orchestrator on completion, overwritten per
/// attempt, cleared when a new checkout begins. A cleared or never-set
/// slot reads as `None`, meaning "nothing to show" rather than an error.
#[derive(Debug, Default)]
pub struct OutcomeStore {
    slot: Mutex<Slot>,
}

impl OutcomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        // the lock is only held across field assignments
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, outcome: TransactionOutcome) {
        self.slot().outcome = Some(outcome);
    }

    /// Re-reads return the same value until the slot is overwritten or
    /// cleared.
    pub fn get(&self) -> Option<TransactionOutcome> {
        self.slot().outcome.clone()
    }

    /// Empties the slot when a new product/checkout selection begins, so
    /// the status view never shows an outcome from an unrelated earlier
    /// attempt. Also invalidates tickets issued before the clear.
    pub fn clear(&self) {
        let mut slot = self.slot();
        slot.outcome = None;
        slot.epoch += 1;
    }

    /// Snapshot of the current checkout generation, taken when an attempt
    /// starts.
    pub fn ticket(&self) -> AttemptTicket {
        AttemptTicket(self.slot().epoch)
    }

    /// Stores the outcome unless the checkout has moved on since `ticket`
    /// was issued. Returns whether the write landed; a late result from an
    /// abandoned attempt is discarded rather than shown stale.
    pub fn publish(&self, ticket: AttemptTicket, outcome: TransactionOutcome) -> bool {
        let mut slot = self.slot();
        if slot.epoch != ticket.0 {
            return false;
        }
        slot.outcome = Some(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::PaymentResult;

    fn outcome(tx_id: &str) -> TransactionOutcome {
        TransactionOutcome {
            result: PaymentResult::Success,
            tx_id: Some(tx_id.to_string()),
            stage: None,
        }
    }

    #[test]
    fn test_empty_store_reads_none() {
        let store = OutcomeStore::new();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_then_get_returns_same_value_until_overwritten() {
        let store = OutcomeStore::new();
        store.set(outcome("abc123"));
        assert_eq!(store.get(), Some(outcome("abc123")));
        assert_eq!(store.get(), Some(outcome("abc123")));

        store.set(outcome("def456"));
        assert_eq!(store.get(), Some(outcome("def456")));
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let store = OutcomeStore::new();
        store.set(outcome("abc123"));
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_publish_with_current_ticket_lands() {
        let store = OutcomeStore::new();
        let ticket = store.ticket();
        assert!(store.publish(ticket, outcome("abc123")));
        assert_eq!(store.get(), Some(outcome("abc123")));
    }

    #[test]
    fn test_publish_after_clear_is_discarded() {
        let store = OutcomeStore::new();
        let ticket = store.ticket();
        store.clear();
        assert!(!store.publish(ticket, outcome("stale")));
        assert_eq!(store.get(), None);
    }
}
