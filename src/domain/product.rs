use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;

/// How the charge for a product is determined.
///
/// `Content` and `Service` products carry a catalog price like `Fixed`
/// ones; only `Variable` products (or those flagged `requires_amount`)
/// take a buyer-entered amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    Fixed,
    Variable,
    Content,
    Service,
}

/// Catalog product descriptor, read-only to the checkout core.
///
/// Field names follow the catalog JSON (`camelCase`). Immutable once
/// loaded for the duration of a checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub pricing_mode: PricingMode,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub suggested_price: Option<Decimal>,
    /// Legacy marker for buyer-entered amounts, OR-ed with the mode.
    #[serde(default)]
    pub requires_amount: bool,
    #[serde(default = "default_currency")]
    pub currency_code: String,
}

fn default_currency() -> String {
    "ARS".to_string()
}

impl Product {
    /// Whether checkout needs a buyer-entered amount for this product.
    pub fn amount_required(&self) -> bool {
        self.pricing_mode == PricingMode::Variable || self.requires_amount
    }

    /// The minimum chargeable amount; an absent `min_price` means zero.
    pub fn minimum(&self) -> Decimal {
        self.min_price.unwrap_or(Decimal::ZERO)
    }

    /// Checks the catalog invariant. Run once at load time so the rest of
    /// the core can rely on it.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if !self.amount_required() {
            match self.price {
                Some(price) if price > Decimal::ZERO => {}
                Some(_) => {
                    return Err(CheckoutError::Catalog(format!(
                        "product {}: price must be positive",
                        self.id
                    )));
                }
                None => {
                    return Err(CheckoutError::Catalog(format!(
                        "product {}: a {} product must carry a price",
                        self.id,
                        match self.pricing_mode {
                            PricingMode::Fixed => "fixed-price",
                            PricingMode::Content => "content",
                            PricingMode::Service => "service",
                            PricingMode::Variable => "variable-price",
                        }
                    )));
                }
            }
        }
        if let Some(min) = self.min_price {
            if min < Decimal::ZERO {
                return Err(CheckoutError::Catalog(format!(
                    "product {}: minPrice must not be negative",
                    self.id
                )));
            }
        }
        if let Some(suggested) = self.suggested_price {
            if suggested < self.minimum() {
                return Err(CheckoutError::Catalog(format!(
                    "product {}: suggestedPrice is below minPrice",
                    self.id
                )));
            }
        }
        if self.currency_code.len() != 3 || !self.currency_code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CheckoutError::Catalog(format!(
                "product {}: currencyCode must be a 3-letter code",
                self.id
            )));
        }
        Ok(())
    }
}
