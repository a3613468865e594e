use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use super::outcome::DepositReceipt;
use super::product::Product;
use super::session::Session;

/// Failure reported by a remote payment-rail collaborator. Opaque to the
/// core beyond the network/rejection split; timeout policy lives with the
/// collaborator, not here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RailError {
    #[error("network error: {0}")]
    Network(String),
    #[error("rejected by the service: {0}")]
    Rejected(String),
}

/// Payment-processor authentication. Session/device-bound: no caller
/// credentials cross this boundary.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self) -> Result<Session, RailError>;
}

/// Converts a fiat amount into the settlement currency.
#[async_trait]
pub trait ConversionService: Send + Sync {
    async fn convert(&self, amount: Decimal) -> Result<Decimal, RailError>;
}

/// Submits the converted amount as a deposit on the rail.
#[async_trait]
pub trait DepositService: Send + Sync {
    async fn deposit(&self, amount: Decimal, session: &Session) -> Result<DepositReceipt, RailError>;
}

/// Product lookup. Resolution happens before checkout begins; the core
/// only ever reads.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, id: &str) -> crate::error::Result<Option<Product>>;
}

pub type AuthServiceBox = Box<dyn AuthService>;
pub type ConversionServiceBox = Box<dyn ConversionService>;
pub type DepositServiceBox = Box<dyn DepositService>;
pub type ProductCatalogBox = Box<dyn ProductCatalog>;
