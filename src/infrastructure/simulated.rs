use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::outcome::{DepositReceipt, PaymentResult, Stage};
use crate::domain::ports::{AuthService, ConversionService, DepositService, RailError};
use crate::domain::session::Session;

/// ARS per settlement unit, so converting 1000 yields 0.01.
const DEFAULT_RATE: Decimal = dec!(0.00001);

const SESSION_TTL_MINUTES: i64 = 15;

/// Payment-rail stand-in implementing all three collaborator ports.
///
/// Converts at a fixed rate, issues monotonically increasing transaction
/// ids, and can be scripted to fail at a given stage. Used by the CLI and
/// as the happy-path double in tests; cloning shares the id counter.
#[derive(Clone)]
pub struct SimulatedRail {
    rate: Decimal,
    fail_at: Option<Stage>,
    next_tx: Arc<AtomicU64>,
}

impl Default for SimulatedRail {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedRail {
    pub fn new() -> Self {
        Self {
            rate: DEFAULT_RATE,
            fail_at: None,
            next_tx: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    /// Scripts the rail to fail whenever `stage` is reached.
    pub fn with_failure(mut self, stage: Stage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    fn fails_at(&self, stage: Stage) -> bool {
        self.fail_at == Some(stage)
    }
}

#[async_trait]
impl AuthService for SimulatedRail {
    async fn authenticate(&self) -> Result<Session, RailError> {
        if self.fails_at(Stage::Auth) {
            return Err(RailError::Network("authentication service unavailable".to_string()));
        }
        let token = format!("sim-token-{}", self.next_tx.load(Ordering::Relaxed));
        Ok(Session::with_expiry(
            token,
            Utc::now() + TimeDelta::minutes(SESSION_TTL_MINUTES),
        ))
    }
}

#[async_trait]
impl ConversionService for SimulatedRail {
    async fn convert(&self, amount: Decimal) -> Result<Decimal, RailError> {
        if self.fails_at(Stage::Conversion) {
            return Err(RailError::Rejected("conversion rate unavailable".to_string()));
        }
        Ok((amount * self.rate).normalize())
    }
}

#[async_trait]
impl DepositService for SimulatedRail {
    async fn deposit(&self, _amount: Decimal, session: &Session) -> Result<DepositReceipt, RailError> {
        if self.fails_at(Stage::Deposit) {
            return Err(RailError::Network("deposit service unavailable".to_string()));
        }
        if session.is_expired(Utc::now()) {
            return Err(RailError::Rejected("session expired".to_string()));
        }
        let tx = self.next_tx.fetch_add(1, Ordering::Relaxed);
        Ok(DepositReceipt {
            result: PaymentResult::Success,
            tx_id: Some(format!("SIM-{tx:08}")),
        })
    }
}
