//! # Scholes-Lib: Black-Scholes Pricing and Parameter Heatmaps
//!
//! `scholes-lib` evaluates the Black-Scholes closed-form formulas for European
//! options, sweeps them across two-parameter grids to build heatmaps, renders
//! those heatmaps to SVG and keeps a history of every calculation.
//!
//! ## Core Features
//!
//! - **Pricing Engine**: call/put prices, `d1`/`d2`, call/put Delta and Gamma
//! - **Grid Sweep**: any two distinct inputs as axes, any output as the cell value
//! - **Heatmap Rendering**: annotated SVG heatmaps with colour bars via `plotters`
//! - **History**: CSV-backed calculation and heatmap storage with reload
//!
//! ## Quick Start
//!
//! ```rust
//! use scholes_lib::{price, sweep, Axis, OptionParameters, OutputField, ParameterField};
//!
//! let params = OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
//! let result = price(params)?;
//! assert!((result.call_price - 10.4506).abs() < 1e-4);
//!
//! let spots = Axis::new(ParameterField::Spot, vec![90.0, 100.0, 110.0]);
//! let vols = Axis::new(ParameterField::Volatility, vec![0.1, 0.2]);
//! let grid = sweep(params, &spots, &vols, OutputField::CallPrice)?;
//! assert_eq!((grid.rows(), grid.cols()), (2, 3));
//! # Ok::<(), scholes_lib::PricingError>(())
//! ```
//!
//! ## Layering
//!
//! The pricing engine ([`models::bs`]) and the grid sweep ([`mod@sweep`]) are
//! pure: they return [`PricingError`] and never log, read configuration or
//! touch the filesystem. Storage ([`history`]), rendering ([`render`]) and the
//! dashboard workflow ([`app`]) sit on top and report through `anyhow` and
//! `tracing`.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod render;
pub mod sweep;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Pricing engine types
pub use error::PricingError;
pub use models::bs::{OptionParameters, OutputField, ParameterField, PricingResult};

// Grid sweep types
pub use sweep::{
    config::{HeatmapConfig, HeatmapRanges},
    types::{Axis, SweepMatrix},
};

// Collaborators
pub use app::{Dashboard, HeatmapForm, PricingForm};
pub use config::{AppConfig, StoreConfig};
pub use history::{CalculationRecord, HistoryStore, StoredHeatmap};
pub use render::RenderConfig;

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured heatmap settings.
///
/// All presets sweep spot (columns) against volatility (rows) with ranges
/// derived from the base parameters unless overridden.
///
/// # Available Configurations
///
/// - [`standard()`]: 12×12 grid used by the dashboard
/// - [`coarse()`]: 6×6 quick look
/// - [`fine()`]: 40×40 grid for smooth surfaces
pub mod default_configs {
    use crate::sweep::config::HeatmapConfig;

    /// Dashboard default: 12 points per axis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scholes_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.resolution, 12);
    /// ```
    pub fn standard() -> HeatmapConfig {
        HeatmapConfig::standard()
    }

    /// 6 points per axis; cell annotations stay readable at small sizes.
    pub fn coarse() -> HeatmapConfig {
        HeatmapConfig::coarse()
    }

    /// 40 points per axis.
    pub fn fine() -> HeatmapConfig {
        HeatmapConfig::fine()
    }
}

/// Price a European call and put under Black-Scholes.
///
/// # Arguments
///
/// * `params` - validated market/contract inputs
///
/// # Returns
///
/// [`PricingResult`] with `d1`, `d2`, call and put prices, both Deltas and
/// the shared Gamma. Values are unrounded `f64`.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] if a constraint is violated
///
/// # Example
///
/// ```rust
/// use scholes_lib::{price, OptionParameters};
///
/// let params = OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?;
/// let r = price(params)?;
/// // Put-call parity
/// let parity = params.current_price() - params.strike() * params.discount_factor();
/// assert!((r.call_price - r.put_price - parity).abs() < 1e-9);
/// # Ok::<(), scholes_lib::PricingError>(())
/// ```
pub fn price(params: OptionParameters) -> Result<PricingResult, PricingError> {
    models::bs::price(params)
}

/// Evaluate one output field over an `axis_y × axis_x` parameter grid.
///
/// Row `i` of the returned matrix corresponds to `axis_y.values[i]` and
/// column `j` to `axis_x.values[j]`; renderers rely on this ordering to line
/// up axis labels with cells.
///
/// # Errors
///
/// * [`PricingError::Configuration`] if both axes vary the same field or an
///   axis has no values
/// * [`PricingError::InvalidParameter`] if any cell's parameters are invalid;
///   the sweep fails as a whole
pub fn sweep(
    base: OptionParameters,
    axis_x: &Axis,
    axis_y: &Axis,
    output: OutputField,
) -> Result<SweepMatrix, PricingError> {
    sweep::grid::sweep(base, axis_x, axis_y, output)
}
