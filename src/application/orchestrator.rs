use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::application::outcome_store::OutcomeStore;
use crate::domain::amount::ChargeAmount;
use crate::domain::outcome::{Stage, StageFailure, TransactionOutcome};
use crate::domain::ports::{AuthServiceBox, ConversionServiceBox, DepositServiceBox};
use crate::error::{CheckoutError, Result};

/// Where a settlement attempt currently is. Transitions fire forward
/// only; `Completed` and `Failed` are terminal until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Authenticating,
    Converting,
    Depositing,
    Completed,
    Failed,
}

impl AttemptState {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            AttemptState::Authenticating | AttemptState::Converting | AttemptState::Depositing
        )
    }
}

/// Drives one settlement attempt through authenticate, convert and
/// deposit, strictly in that order, failing fast on the first
/// collaborator error.
///
/// `SettlementOrchestrator` owns the rail ports and ensures at most one
/// attempt is in flight at a time: `pay` is callable only from `Idle` and
/// fails with [`CheckoutError::Busy`] otherwise. The UI disabling its
/// trigger is expected, but the guard holds even under programming error.
pub struct SettlementOrchestrator {
    auth: AuthServiceBox,
    conversion: ConversionServiceBox,
    deposit: DepositServiceBox,
    outcomes: Arc<OutcomeStore>,
    state: Mutex<AttemptState>,
}

impl SettlementOrchestrator {
    /// Creates an orchestrator in `Idle` over the given rail ports,
    /// publishing completed outcomes into `outcomes`.
    pub fn new(
        auth: AuthServiceBox,
        conversion: ConversionServiceBox,
        deposit: DepositServiceBox,
        outcomes: Arc<OutcomeStore>,
    ) -> Self {
        Self {
            auth,
            conversion,
            deposit,
            outcomes,
            state: Mutex::new(AttemptState::Idle),
        }
    }

    pub fn state(&self) -> AttemptState {
        *self.lock_state()
    }

    /// Returns a finished machine to `Idle` so a fresh attempt can be
    /// made. Fails with `Busy` while an attempt is still in flight.
    pub fn reset(&self) -> Result<()> {
        let mut state = self.lock_state();
        if state.is_in_flight() {
            return Err(CheckoutError::Busy);
        }
        *state = AttemptState::Idle;
        Ok(())
    }

    /// Runs one settlement attempt for `charge`.
    ///
    /// The three remote calls are awaited sequentially; each depends on
    /// the previous step's result, so nothing is issued speculatively.
    /// Any stage failure is terminal for the attempt: the token and the
    /// conversion quote are attempt-scoped, and a retry starts over from
    /// authentication. A failed attempt leaves no partial outcome in the
    /// store.
    pub async fn pay(&self, charge: ChargeAmount) -> Result<TransactionOutcome> {
        self.begin()?;
        let ticket = self.outcomes.ticket();

        match self.run(charge).await {
            Ok(outcome) => {
                self.set_state(AttemptState::Completed);
                if !self.outcomes.publish(ticket, outcome.clone()) {
                    debug!(tx_id = ?outcome.tx_id, "checkout superseded, outcome discarded");
                }
                Ok(outcome)
            }
            Err(failure) => {
                warn!(stage = %failure.stage, error = %failure.source, "settlement attempt failed");
                self.set_state(AttemptState::Failed);
                Err(failure.into())
            }
        }
    }

    async fn run(&self, charge: ChargeAmount) -> std::result::Result<TransactionOutcome, StageFailure> {
        debug!(amount = %charge, "authenticating with the payment processor");
        let session = self
            .auth
            .authenticate()
            .await
            .map_err(|e| StageFailure::new(Stage::Auth, e))?;

        self.set_state(AttemptState::Converting);
        debug!(amount = %charge, "requesting settlement conversion");
        let settlement = self
            .conversion
            .convert(charge.value())
            .await
            .map_err(|e| StageFailure::new(Stage::Conversion, e))?;

        self.set_state(AttemptState::Depositing);
        debug!(%settlement, "submitting deposit");
        let receipt = self
            .deposit
            .deposit(settlement, &session)
            .await
            .map_err(|e| StageFailure::new(Stage::Deposit, e))?;

        debug!(result = %receipt.result, tx_id = ?receipt.tx_id, "deposit acknowledged");
        Ok(TransactionOutcome::from(receipt))
    }

    /// Single-flight guard: only an `Idle` machine may start an attempt.
    fn begin(&self) -> Result<()> {
        let mut state = self.lock_state();
        if *state != AttemptState::Idle {
            return Err(CheckoutError::Busy);
        }
        *state = AttemptState::Authenticating;
        Ok(())
    }

    fn set_state(&self, next: AttemptState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, AttemptState> {
        // held only across transitions, never across an await
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
