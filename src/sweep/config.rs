use crate::error::{PricingError, Result};
use crate::models::bs::OptionParameters;
use crate::models::utils::linspace;
use serde::{Deserialize, Serialize};

use super::types::{Axis, ParameterField};

/// Smallest grid the heatmap accepts per axis.
pub const MIN_RESOLUTION: usize = 2;
/// Largest grid the heatmap accepts per axis.
pub const MAX_RESOLUTION: usize = 80;

/// Spot × volatility heatmap settings.
///
/// Missing bounds are derived from the base parameters when the ranges are
/// resolved (see [`HeatmapConfig::resolve_ranges`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Number of grid points on each axis
    #[serde(default = "default_resolution")]
    pub resolution: usize,

    /// Lower spot bound (default: 80% of the base spot)
    #[serde(default)]
    pub spot_min: Option<f64>,

    /// Upper spot bound (default: 120% of the base spot)
    #[serde(default)]
    pub spot_max: Option<f64>,

    /// Lower volatility bound (default: half the base volatility, floored at 0.01)
    #[serde(default)]
    pub vol_min: Option<f64>,

    /// Upper volatility bound (default: 1.5× the base volatility, capped at 5.0)
    #[serde(default)]
    pub vol_max: Option<f64>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl HeatmapConfig {
    /// Dashboard default: 12×12 grid with derived ranges
    pub fn standard() -> Self {
        Self {
            resolution: default_resolution(),
            spot_min: None,
            spot_max: None,
            vol_min: None,
            vol_max: None,
        }
    }

    /// Quick-look 6×6 grid
    pub fn coarse() -> Self {
        Self {
            resolution: 6,
            ..Self::standard()
        }
    }

    /// Dense 40×40 grid; annotations get crowded, useful for smooth plots
    pub fn fine() -> Self {
        Self {
            resolution: 40,
            ..Self::standard()
        }
    }

    /// Fills missing bounds from `base` and validates the result.
    pub fn resolve_ranges(&self, base: &OptionParameters) -> Result<HeatmapRanges> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(PricingError::configuration(format!(
                "Resolution must be between {} and {}, got {}",
                MIN_RESOLUTION, MAX_RESOLUTION, self.resolution
            )));
        }

        let spot = base.current_price();
        let vol = base.volatility();

        let spot_min = self.spot_min.unwrap_or(spot * 0.8);
        let spot_max = self.spot_max.unwrap_or(spot * 1.2);
        let vol_min = self.vol_min.unwrap_or((vol * 0.5).max(0.01));
        let vol_max = self.vol_max.unwrap_or((vol * 1.5).min(5.0));

        check_range("Spot", spot_min, spot_max)?;
        check_range("Vol", vol_min, vol_max)?;

        Ok(HeatmapRanges {
            resolution: self.resolution,
            spot_min,
            spot_max,
            vol_min,
            vol_max,
        })
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || max <= 0.0 {
        return Err(PricingError::configuration(format!(
            "{} ranges must be > 0 (min={}, max={})",
            name, min, max
        )));
    }
    if max <= min {
        return Err(PricingError::configuration(format!(
            "Max {} must be greater than Min {} (min={}, max={})",
            name, name, min, max
        )));
    }
    Ok(())
}

/// Validated spot and volatility bounds for a heatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapRanges {
    pub resolution: usize,
    pub spot_min: f64,
    pub spot_max: f64,
    pub vol_min: f64,
    pub vol_max: f64,
}

impl HeatmapRanges {
    /// Spot axis (x, columns) and volatility axis (y, rows).
    pub fn axes(&self) -> (Axis, Axis) {
        (
            Axis::new(
                ParameterField::Spot,
                linspace(self.spot_min, self.spot_max, self.resolution),
            ),
            Axis::new(
                ParameterField::Volatility,
                linspace(self.vol_min, self.vol_max, self.resolution),
            ),
        )
    }
}

fn default_resolution() -> usize {
    12
}
