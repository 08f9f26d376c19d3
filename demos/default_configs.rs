use scholes_lib::{default_configs, HeatmapConfig, OptionParameters};

fn describe(name: &str, config: &HeatmapConfig, base: &OptionParameters) {
    println!("{}:", name);
    println!("   Resolution: {0} x {0}", config.resolution);
    match config.resolve_ranges(base) {
        Ok(ranges) => {
            println!(
                "   Spot range: [{:.2}, {:.2}]",
                ranges.spot_min, ranges.spot_max
            );
            println!(
                "   Vol range:  [{:.4}, {:.4}]",
                ranges.vol_min, ranges.vol_max
            );
            println!("   Cells per heatmap: {}", ranges.resolution * ranges.resolution);
        }
        Err(e) => println!("   ❌ Invalid configuration: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    println!("Scholes-lib Default Heatmap Configurations\n");

    let base = match OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05) {
        Ok(p) => p,
        Err(e) => {
            println!("❌ Invalid base parameters: {}", e);
            return;
        }
    };

    // 1. Dashboard default
    describe("1. Standard Configuration (dashboard default)", &default_configs::standard(), &base);
    println!("   Use case: Interactive exploration\n");

    // 2. Quick look
    describe("2. Coarse Configuration (quick look)", &default_configs::coarse(), &base);
    println!("   Use case: Small images, readable annotations\n");

    // 3. Smooth surfaces
    describe("3. Fine Configuration (smooth surface)", &default_configs::fine(), &base);
    println!("   Use case: Reports, unannotated surfaces\n");

    // 4. Overridden range
    let custom = HeatmapConfig {
        spot_min: Some(50.0),
        spot_max: Some(150.0),
        ..default_configs::standard()
    };
    describe("4. Custom spot range", &custom, &base);

    // 5. Broken range
    let broken = HeatmapConfig {
        vol_min: Some(0.5),
        vol_max: Some(0.1),
        ..default_configs::coarse()
    };
    describe("\n5. Inverted volatility range", &broken, &base);
}
