use serde::{Deserialize, Serialize};

use crate::models::bs::{OptionParameters, PricingResult};
use crate::sweep::types::{OutputField, SweepMatrix};

/// Column order of `option_pricing.csv`.
pub const CALCULATION_HEADERS: [&str; 12] = [
    "calc_id",
    "timestamp",
    "current_price",
    "strike_price",
    "time_to_maturity",
    "volatility",
    "risk_free_interest_rate",
    "call_price",
    "put_price",
    "call_delta",
    "put_delta",
    "gamma",
];

/// Column order of `heatmap_data.csv`.
pub const HEATMAP_HEADERS: [&str; 6] = [
    "heatmap_id",
    "calc_id",
    "spot",
    "volatility",
    "call_price",
    "put_price",
];

/// One priced calculation as stored in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub calc_id: u64,
    /// Unix seconds
    pub timestamp: i64,
    pub current_price: f64,
    pub strike_price: f64,
    pub time_to_maturity: f64,
    pub volatility: f64,
    pub risk_free_interest_rate: f64,
    pub call_price: f64,
    pub put_price: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub gamma: f64,
}

impl CalculationRecord {
    pub fn new(
        calc_id: u64,
        timestamp: i64,
        params: &OptionParameters,
        result: &PricingResult,
    ) -> Self {
        Self {
            calc_id,
            timestamp,
            current_price: params.current_price(),
            strike_price: params.strike(),
            time_to_maturity: params.time_to_maturity(),
            volatility: params.volatility(),
            risk_free_interest_rate: params.interest_rate(),
            call_price: result.call_price,
            put_price: result.put_price,
            call_delta: result.call_delta,
            put_delta: result.put_delta,
            gamma: result.gamma,
        }
    }

    /// Rebuilds the validated input parameters.
    pub fn parameters(&self) -> crate::error::Result<OptionParameters> {
        OptionParameters::new(
            self.time_to_maturity,
            self.strike_price,
            self.current_price,
            self.volatility,
            self.risk_free_interest_rate,
        )
    }
}

/// One heatmap cell before it is assigned an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapRecord {
    pub spot: f64,
    pub volatility: f64,
    pub call_price: f64,
    pub put_price: f64,
}

/// One heatmap cell as stored in `heatmap_data.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredHeatmapRow {
    pub heatmap_id: u64,
    pub calc_id: u64,
    pub spot: f64,
    pub volatility: f64,
    pub call_price: f64,
    pub put_price: f64,
}

/// Heatmap rows of one calculation reassembled into call and put matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredHeatmap {
    pub calc_id: u64,
    pub call: SweepMatrix,
    pub put: SweepMatrix,
}

/// Flattens spot × volatility call/put matrices into storable cells,
/// row-major (volatility outer, spot inner).
///
/// Returns `None` unless both matrices are priced over the same spot (x) and
/// volatility (y) axes and hold call and put prices respectively.
pub fn heatmap_records(call: &SweepMatrix, put: &SweepMatrix) -> Option<Vec<HeatmapRecord>> {
    use crate::sweep::types::ParameterField;

    let aligned = call.x_axis == put.x_axis
        && call.y_axis == put.y_axis
        && call.x_axis.field == ParameterField::Spot
        && call.y_axis.field == ParameterField::Volatility
        && call.output == OutputField::CallPrice
        && put.output == OutputField::PutPrice;
    if !aligned {
        return None;
    }

    Some(
        call.cells()
            .zip(put.cells())
            .map(|((spot, volatility, call_price), (_, _, put_price))| HeatmapRecord {
                spot,
                volatility,
                call_price,
                put_price,
            })
            .collect(),
    )
}
