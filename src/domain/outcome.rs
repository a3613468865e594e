use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::ports::RailError;

/// Normalised settlement result.
///
/// The deposit service answers `"SUCCESS"`, `"PENDING"` or `"FAILED"`, but
/// legacy backends answer the numeric sentinel `0` for success. Both wire
/// forms collapse to one tag here; nothing past the serde boundary ever
/// sees the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentResult {
    Success,
    Pending,
    Failed,
}

impl PaymentResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentResult::Success)
    }
}

impl fmt::Display for PaymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentResult::Success => "SUCCESS",
            PaymentResult::Pending => "PENDING",
            PaymentResult::Failed => "FAILED",
        })
    }
}

impl<'de> Deserialize<'de> for PaymentResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResultVisitor;

        impl<'de> Visitor<'de> for ResultVisitor {
            type Value = PaymentResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"SUCCESS\", \"PENDING\", \"FAILED\" or the numeric sentinel 0")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match value {
                    "SUCCESS" => Ok(PaymentResult::Success),
                    "PENDING" => Ok(PaymentResult::Pending),
                    "FAILED" => Ok(PaymentResult::Failed),
                    other => Err(E::unknown_variant(other, &["SUCCESS", "PENDING", "FAILED"])),
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == 0 {
                    Ok(PaymentResult::Success)
                } else {
                    Err(E::invalid_value(de::Unexpected::Unsigned(value), &self))
                }
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == 0 {
                    Ok(PaymentResult::Success)
                } else {
                    Err(E::invalid_value(de::Unexpected::Signed(value), &self))
                }
            }
        }

        deserializer.deserialize_any(ResultVisitor)
    }
}

/// The settlement step a failed attempt died in. Retained for diagnostics;
/// the user sees a generic failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    Auth,
    Conversion,
    Deposit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Auth => "AUTH",
            Stage::Conversion => "CONVERSION",
            Stage::Deposit => "DEPOSIT",
        })
    }
}

/// A collaborator call failed mid-attempt. Terminal for the attempt: the
/// caller resets the orchestrator and re-runs the whole flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("payment failed during {stage}: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: RailError,
}

impl StageFailure {
    pub fn new(stage: Stage, source: RailError) -> Self {
        Self { stage, source }
    }
}

/// What the deposit service answers on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositReceipt {
    pub result: PaymentResult,
    #[serde(default)]
    pub tx_id: Option<String>,
}

/// The durable result of one settlement attempt, held by the outcome
/// store and read by the status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub result: PaymentResult,
    #[serde(default)]
    pub tx_id: Option<String>,
    /// Failure origin when the rail itself reported a failed settlement.
    #[serde(default)]
    pub stage: Option<Stage>,
}

impl TransactionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

impl From<DepositReceipt> for TransactionOutcome {
    fn from(receipt: DepositReceipt) -> Self {
        Self {
            result: receipt.result,
            tx_id: receipt.tx_id,
            stage: None,
        }
    }
}
