use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use checkout_engine::application::orchestrator::SettlementOrchestrator;
use checkout_engine::application::outcome_store::OutcomeStore;
use checkout_engine::domain::outcome::Stage;
use checkout_engine::domain::ports::ProductCatalog;
use checkout_engine::domain::pricing::resolve_charge;
use checkout_engine::infrastructure::in_memory::InMemoryCatalog;
use checkout_engine::infrastructure::simulated::SimulatedRail;
use checkout_engine::interfaces::json::catalog_reader::CatalogReader;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum FailStage {
    Auth,
    Conversion,
    Deposit,
}

impl From<FailStage> for Stage {
    fn from(stage: FailStage) -> Self {
        match stage {
            FailStage::Auth => Stage::Auth,
            FailStage::Conversion => Stage::Conversion,
            FailStage::Deposit => Stage::Deposit,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product catalog JSON file
    catalog: PathBuf,

    /// Id of the product to check out
    product_id: String,

    /// Amount to charge; required for variable-price products, ignored otherwise
    #[arg(long, default_value = "")]
    amount: String,

    /// Force the simulated rail to fail at a stage
    #[arg(long, value_enum)]
    fail_at: Option<FailStage>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.catalog).into_diagnostic()?;
    let products = CatalogReader::new(file).products().into_diagnostic()?;
    let catalog = InMemoryCatalog::with_products(products).into_diagnostic()?;

    let product = catalog
        .product(&cli.product_id)
        .await
        .into_diagnostic()?
        .ok_or_else(|| miette!("product not found: {}", cli.product_id))?;

    let charge = resolve_charge(&product, &cli.amount).into_diagnostic()?;
    println!(
        "Checkout: {} for {} {}",
        product.name, product.currency_code, charge
    );

    let mut rail = SimulatedRail::new();
    if let Some(stage) = cli.fail_at {
        rail = rail.with_failure(stage.into());
    }

    // a new checkout begins: nothing stale may survive into the status view
    let outcomes = Arc::new(OutcomeStore::new());
    outcomes.clear();

    let orchestrator = SettlementOrchestrator::new(
        Box::new(rail.clone()),
        Box::new(rail.clone()),
        Box::new(rail),
        Arc::clone(&outcomes),
    );

    orchestrator
        .pay(charge)
        .await
        .into_diagnostic()
        .wrap_err("Payment failed. Please try again.")?;

    // status view: render whatever the store holds
    match outcomes.get() {
        Some(outcome) => {
            if outcome.is_success() {
                println!("Payment successful ({})", outcome.result);
            } else {
                println!("Payment processing ({})", outcome.result);
            }
            if let Some(tx_id) = outcome.tx_id {
                println!("Transaction id: {tx_id}");
            }
        }
        None => println!("No payment to show"),
    }

    Ok(())
}
