// Example: heatmap_demo.rs
// Sweeps two parameters of an at-the-money option and writes SVG heatmaps.
//
// Usage:
//     cargo run --example heatmap_demo -- [output_dir]
//
// Writes call_put_heatmap.svg (spot × volatility, call and put side by side)
// and gamma_heatmap.svg (strike × time to maturity) to output_dir, which
// defaults to the working directory.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use scholes_lib::render::{render_heatmap, render_price_heatmaps};
use scholes_lib::sweep::sweep_many;
use scholes_lib::{
    default_configs, sweep, Axis, OptionParameters, OutputField, ParameterField, RenderConfig,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let base = OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
    let render = RenderConfig::default();

    // Spot × volatility call/put grid with the dashboard's default ranges
    let ranges = default_configs::coarse().resolve_ranges(&base)?;
    let (spots, vols) = ranges.axes();
    let mut grids = sweep_many(
        base,
        &spots,
        &vols,
        &[OutputField::CallPrice, OutputField::PutPrice],
    )?;
    let put = grids.remove(1);
    let call = grids.remove(0);

    println!(
        "Call prices over spot [{:.2}, {:.2}] × vol [{:.4}, {:.4}]",
        ranges.spot_min, ranges.spot_max, ranges.vol_min, ranges.vol_max
    );
    for (row, vol) in call.values.iter().zip(&call.y_axis.values) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:7.2}", v)).collect();
        println!("  σ={:.3} | {}", vol, cells.join(" "));
    }

    let path = out_dir.join("call_put_heatmap.svg");
    render_price_heatmaps(&call, &put, "", &path, &render)?;
    println!("Wrote {}", path.display());

    // Any two distinct inputs can be swept
    let strikes = Axis::new(ParameterField::Strike, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
    let maturities = Axis::new(
        ParameterField::TimeToMaturity,
        vec![0.1, 0.25, 0.5, 1.0, 2.0],
    );
    let gamma = sweep(base, &strikes, &maturities, OutputField::Gamma)?;
    if let (Some(lo), Some(hi)) = (gamma.min(), gamma.max()) {
        println!("Gamma ranges from {:.6} to {:.6}", lo, hi);
    }

    let path = out_dir.join("gamma_heatmap.svg");
    render_heatmap(&gamma, "Gamma by strike and maturity", &path, &render)?;
    println!("Wrote {}", path.display());

    Ok(())
}
