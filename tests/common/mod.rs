use std::fs;
use std::io::Error;
use std::path::Path;

/// Writes a small catalog covering the pricing modes, mirroring
/// `tests/fixtures/catalog.json`, for tests that need a writable copy.
pub fn write_catalog(path: &Path) -> Result<(), Error> {
    let catalog = r#"[
        {
            "id": "coffee",
            "name": "Coffee",
            "pricingMode": "FIXED",
            "price": "1500.50"
        },
        {
            "id": "topup",
            "name": "Account top-up",
            "pricingMode": "VARIABLE",
            "minPrice": "500",
            "suggestedPrice": "1000"
        }
    ]"#;
    fs::write(path, catalog)
}
