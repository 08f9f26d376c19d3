// demos/pricing_demo.rs

//! Demonstration of Black-Scholes pricing
//!
//! This example shows how to:
//! 1. Build validated option parameters
//! 2. Price a call and put with their Greeks
//! 3. Check put-call parity on the result
//! 4. See how invalid inputs are rejected

use anyhow::Result;
use scholes_lib::{price, OptionParameters, PricingError};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    // S=100, K=100, T=1y, σ=20%, r=5%
    let params = OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
    println!("\nStep 1: Inputs");
    println!("  Current price:    {:.2}", params.current_price());
    println!("  Strike:           {:.2}", params.strike());
    println!("  Time to maturity: {:.2} years", params.time_to_maturity());
    println!("  Volatility:       {:.2}", params.volatility());
    println!("  Interest rate:    {:.2}", params.interest_rate());

    println!("\nStep 2: Pricing...");
    let result = price(params)?;
    println!("  d1 = {:.6}, d2 = {:.6}", result.d1, result.d2);
    println!("  {}", result);

    println!("\nStep 3: Put-call parity");
    let lhs = result.call_price - result.put_price;
    let rhs = params.current_price() - params.strike() * params.discount_factor();
    println!("  C - P         = {:.10}", lhs);
    println!("  S - K·e^(-rT) = {:.10}", rhs);
    println!("  difference    = {:.2e}", (lhs - rhs).abs());

    println!("\nStep 4: Strike ladder");
    println!("  {:>8} {:>12} {:>12} {:>10}", "Strike", "Call", "Put", "Δ Call");
    for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
        let p = OptionParameters::new(1.0, strike, 100.0, 0.2, 0.05)?;
        let r = price(p)?;
        println!(
            "  {:>8.2} {:>12.6} {:>12.6} {:>10.4}",
            strike, r.call_price, r.put_price, r.call_delta
        );
    }

    println!("\nStep 5: Invalid input");
    match OptionParameters::new(1.0, 100.0, 100.0, 0.0, 0.05) {
        Err(e @ PricingError::InvalidParameter { .. }) => println!("  Rejected: {}", e),
        Err(e) => println!("  Unexpected error: {}", e),
        Ok(p) => println!("  Unexpectedly accepted: {:?}", p),
    }

    Ok(())
}
