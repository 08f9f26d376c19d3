// demos/history_demo.rs

//! Walk through the dashboard workflow against a history directory
//!
//! This example shows how to:
//! 1. Load configuration (TOML file or `SCHOLES_DATA_DIR`)
//! 2. Calculate prices from form-style text inputs
//! 3. Generate and store a call/put heatmap
//! 4. Browse the history and re-plot a stored calculation
//!
//! Usage:
//!     cargo run --example history_demo -- [config.toml]

use std::env;

use anyhow::Result;
use scholes_lib::{AppConfig, Dashboard, HeatmapForm, PricingForm, StoreConfig};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = match env::args().nth(1) {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig {
            store: StoreConfig::from_env(),
            ..AppConfig::default()
        },
    };
    info!(data_dir = %config.store.data_dir.display(), "using history directory");

    let mut dashboard = Dashboard::from_config(&config)?;
    let placeholder = dashboard.placeholder()?;
    println!("Placeholder image: {}", placeholder.display());

    // Heatmap before any calculation is refused
    let heatmap_form = HeatmapForm::with_resolution(config.heatmap.resolution);
    let form = PricingForm::new("100", "100", "1", "0.2", "0.05");
    if let Err(e) = dashboard.generate_heatmap(&form, &heatmap_form) {
        println!("Expected refusal: {}", e);
    }

    println!("\nStep 1: Calculate prices");
    let calc = dashboard.calculate_prices(&form)?;
    println!("  calc_id={} {}", calc.calc_id, calc.result);

    println!("\nStep 2: Generate heatmap");
    let output = dashboard.generate_heatmap(&form, &heatmap_form)?;
    println!(
        "  {}×{} grid written to {}",
        output.call.rows(),
        output.call.cols(),
        output.image_path.display()
    );

    println!("\nStep 3: Invalid input is reported and not stored");
    let bad = PricingForm::new("100", "", "1", "0.2", "0.05");
    match dashboard.calculate_prices(&bad) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  Error: {}", e),
    }

    println!("\nStep 4: History");
    for record in dashboard.history()? {
        println!(
            "  #{:<4} S={:<8.2} K={:<8.2} T={:<6.2} σ={:<6.3} r={:<6.3} call={:.4} put={:.4}",
            record.calc_id,
            record.current_price,
            record.strike_price,
            record.time_to_maturity,
            record.volatility,
            record.risk_free_interest_rate,
            record.call_price,
            record.put_price
        );
    }

    let reloaded = dashboard.load_history_item(calc.calc_id)?;
    println!("\nRe-plotted calc_id={} to {}", reloaded.calc_id, reloaded.image_path.display());

    Ok(())
}
