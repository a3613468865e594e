use checkout_engine::domain::amount::{
    AmountField, ValidationError, validate_keystroke, validate_submission,
};
use checkout_engine::domain::pricing::resolve_charge;
use checkout_engine::domain::product::{PricingMode, Product};
use checkout_engine::error::CheckoutError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn variable_product(min: Option<Decimal>) -> Product {
    Product {
        id: "topup".to_string(),
        name: "Account top-up".to_string(),
        description: None,
        pricing_mode: PricingMode::Variable,
        price: None,
        min_price: min,
        suggested_price: None,
        requires_amount: false,
        currency_code: "ARS".to_string(),
    }
}

fn fixed_product(price: Decimal) -> Product {
    Product {
        id: "coffee".to_string(),
        name: "Coffee".to_string(),
        description: None,
        pricing_mode: PricingMode::Fixed,
        price: Some(price),
        min_price: None,
        suggested_price: None,
        requires_amount: false,
        currency_code: "ARS".to_string(),
    }
}

#[test]
fn test_keystroke_acceptance_table() {
    let cases = [
        ("", true),
        ("1", true),
        ("1500", true),
        ("1500.", true),
        ("1500.50", true),
        (".5", true),
        (".12345678", true),
        ("1500.12345678", true),
        (".", false),
        ("1500.123456789", false),
        (".123456789", false),
        ("-1", false),
        ("1,5", false),
        ("1.2.3", false),
        ("12a", false),
        (" 12", false),
        ("1e5", false),
    ];
    for (text, expected) in cases {
        assert_eq!(validate_keystroke(text), expected, "text {text:?}");
    }
}

#[test]
fn test_typing_a_decimal_one_keystroke_at_a_time() {
    let mut field = AmountField::new();
    for step in ["1", "15", "150", "1500", "1500.", "1500.5", "1500.50"] {
        assert!(field.apply(step), "step {step:?} should be accepted");
    }
    assert_eq!(field.text(), "1500.50");

    // a stray character never lands in the field
    assert!(!field.apply("1500.50x"));
    assert_eq!(field.text(), "1500.50");
}

#[test]
fn test_submission_accepts_iff_positive_and_at_least_minimum() {
    assert_eq!(validate_submission("1000", dec!(500)), Ok(dec!(1000)));
    assert_eq!(validate_submission("500", dec!(500)), Ok(dec!(500)));
    assert_eq!(
        validate_submission("499.99", dec!(500)),
        Err(ValidationError::BelowMinimum { minimum: dec!(500) })
    );
    assert_eq!(validate_submission("", dec!(500)), Err(ValidationError::Empty));
    assert_eq!(
        validate_submission("0", Decimal::ZERO),
        Err(ValidationError::NotPositive)
    );
}

#[test]
fn test_fixed_price_product_charges_catalog_price() {
    let product = fixed_product(dec!(1500.50));
    for entered in ["", "1", "99999999"] {
        assert_eq!(
            resolve_charge(&product, entered).unwrap().value(),
            dec!(1500.50)
        );
    }
}

#[test]
fn test_variable_price_product_minimum_boundary() {
    let product = variable_product(Some(dec!(500)));

    assert!(matches!(
        resolve_charge(&product, "499.99"),
        Err(CheckoutError::Validation(ValidationError::BelowMinimum { .. }))
    ));
    assert_eq!(resolve_charge(&product, "500").unwrap().value(), dec!(500));
}

#[test]
fn test_variable_price_product_without_minimum() {
    let product = variable_product(None);
    assert_eq!(resolve_charge(&product, "0.01").unwrap().value(), dec!(0.01));
    assert!(matches!(
        resolve_charge(&product, ""),
        Err(CheckoutError::Validation(ValidationError::Empty))
    ));
}
