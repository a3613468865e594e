use crate::domain::amount::{ChargeAmount, validate_submission};
use crate::domain::product::Product;
use crate::error::{CheckoutError, Result};

/// Decides what a checkout actually charges for `product`.
///
/// Products that do not take an entered amount charge their catalog price
/// and ignore `entered`. Variable-price products validate `entered`
/// against the product minimum and charge the parsed value. Keeping the
/// decision here means fixed- and variable-price products share one
/// settlement path downstream.
pub fn resolve_charge(product: &Product, entered: &str) -> Result<ChargeAmount> {
    if product.amount_required() {
        let amount = validate_submission(entered, product.minimum())?;
        Ok(ChargeAmount::new(amount)?)
    } else {
        let price = product.price.ok_or_else(|| {
            CheckoutError::Catalog(format!("product {} has no catalog price", product.id))
        })?;
        Ok(ChargeAmount::new(price)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::ValidationError;
    use crate::domain::product::PricingMode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn product(mode: PricingMode) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Product".to_string(),
            description: None,
            pricing_mode: mode,
            price: None,
            min_price: None,
            suggested_price: None,
            requires_amount: false,
            currency_code: "ARS".to_string(),
        }
    }

    #[test]
    fn test_fixed_product_ignores_entered_text() {
        let mut fixed = product(PricingMode::Fixed);
        fixed.price = Some(dec!(1500.50));

        for entered in ["", "999999", "garbage"] {
            let charge = resolve_charge(&fixed, entered).unwrap();
            assert_eq!(charge.value(), dec!(1500.50));
        }
    }

    #[test]
    fn test_content_and_service_products_charge_catalog_price() {
        for mode in [PricingMode::Content, PricingMode::Service] {
            let mut p = product(mode);
            p.price = Some(dec!(800));
            assert_eq!(resolve_charge(&p, "").unwrap().value(), dec!(800));
        }
    }

    #[test]
    fn test_variable_product_enforces_minimum() {
        let mut variable = product(PricingMode::Variable);
        variable.min_price = Some(dec!(500));

        match resolve_charge(&variable, "499.99") {
            Err(CheckoutError::Validation(ValidationError::BelowMinimum { minimum })) => {
                assert_eq!(minimum, dec!(500));
            }
            other => panic!("expected BelowMinimum, got {other:?}"),
        }

        let charge = resolve_charge(&variable, "500").unwrap();
        assert_eq!(charge.value(), dec!(500));
    }

    #[test]
    fn test_variable_product_without_minimum_accepts_any_positive_amount() {
        let variable = product(PricingMode::Variable);
        assert_eq!(variable.minimum(), Decimal::ZERO);
        let charge = resolve_charge(&variable, "0.00000001").unwrap();
        assert_eq!(charge.value(), dec!(0.00000001));
    }

    #[test]
    fn test_variable_product_rejects_empty_amount() {
        let variable = product(PricingMode::Variable);
        assert!(matches!(
            resolve_charge(&variable, ""),
            Err(CheckoutError::Validation(ValidationError::Empty))
        ));
    }

    #[test]
    fn test_legacy_requires_amount_flag_routes_through_validation() {
        let mut p = product(PricingMode::Service);
        p.price = Some(dec!(100));
        p.requires_amount = true;

        // the flag wins: the entered amount is charged, not the price
        let charge = resolve_charge(&p, "250").unwrap();
        assert_eq!(charge.value(), dec!(250));
    }

    #[test]
    fn test_fixed_product_without_price_is_a_catalog_error() {
        let broken = product(PricingMode::Fixed);
        assert!(matches!(
            resolve_charge(&broken, ""),
            Err(CheckoutError::Catalog(_))
        ));
    }
}
