//! Text-form parsing for the dashboard inputs.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::models::bs::OptionParameters;
use crate::sweep::config::HeatmapConfig;

/// Parses a form field as `f64`.
///
/// Surrounding whitespace is ignored. An empty field is an error when
/// `required`, otherwise it yields `default`.
pub fn read_float(text: &str, name: &str, required: bool, default: Option<f64>) -> Result<Option<f64>> {
    let s = text.trim();
    if s.is_empty() {
        if required {
            return Err(anyhow!("'{}' is required.", name));
        }
        return Ok(default);
    }
    s.parse::<f64>()
        .map(Some)
        .map_err(|_| anyhow!("Invalid number for '{}': '{}'", name, s))
}

fn read_required(text: &str, name: &str) -> Result<f64> {
    read_float(text, name, true, None)?.ok_or_else(|| anyhow!("'{}' is required.", name))
}

/// The five pricing inputs as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingForm {
    pub current_price: String,
    pub strike: String,
    pub time_to_maturity: String,
    pub volatility: String,
    pub interest_rate: String,
}

impl PricingForm {
    pub fn new(
        current_price: impl Into<String>,
        strike: impl Into<String>,
        time_to_maturity: impl Into<String>,
        volatility: impl Into<String>,
        interest_rate: impl Into<String>,
    ) -> Self {
        Self {
            current_price: current_price.into(),
            strike: strike.into(),
            time_to_maturity: time_to_maturity.into(),
            volatility: volatility.into(),
            interest_rate: interest_rate.into(),
        }
    }

    /// All fields are required; domain errors name the offending field.
    pub fn parse(&self) -> Result<OptionParameters> {
        let current_price = read_required(&self.current_price, "Current Asset Price")?;
        let strike = read_required(&self.strike, "Strike Price")?;
        let ttm = read_required(&self.time_to_maturity, "Time to Maturity")?;
        let vol = read_required(&self.volatility, "Volatility")?;
        let rate = read_required(&self.interest_rate, "Risk-Free Rate")?;

        Ok(OptionParameters::new(ttm, strike, current_price, vol, rate)?)
    }
}

/// Heatmap resolution and optional range bounds as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapForm {
    pub resolution: String,
    pub spot_min: String,
    pub spot_max: String,
    pub vol_min: String,
    pub vol_max: String,
}

impl HeatmapForm {
    pub fn with_resolution(resolution: usize) -> Self {
        Self {
            resolution: resolution.to_string(),
            ..Self::default()
        }
    }

    /// Empty resolution falls back to the standard preset; empty bounds stay
    /// unset and are derived from the base parameters later.
    pub fn to_config(&self) -> Result<HeatmapConfig> {
        let standard = HeatmapConfig::standard();
        let resolution = match self.resolution.trim() {
            "" => standard.resolution,
            s => s
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid resolution: '{}'", s))?,
        };

        Ok(HeatmapConfig {
            resolution,
            spot_min: read_float(&self.spot_min, "Min Spot", false, None)?,
            spot_max: read_float(&self.spot_max, "Max Spot", false, None)?,
            vol_min: read_float(&self.vol_min, "Min Volatility", false, None)?,
            vol_max: read_float(&self.vol_max, "Max Volatility", false, None)?,
        })
    }
}
