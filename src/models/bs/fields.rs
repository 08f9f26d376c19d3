use super::{OptionParameters, PricingResult};
use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five pricing inputs, used to name sweep axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    Spot,
    Strike,
    Volatility,
    TimeToMaturity,
    InterestRate,
}

impl ParameterField {
    pub const ALL: [ParameterField; 5] = [
        ParameterField::Spot,
        ParameterField::Strike,
        ParameterField::Volatility,
        ParameterField::TimeToMaturity,
        ParameterField::InterestRate,
    ];

    /// Human-readable label for messages and plot axes.
    pub fn label(&self) -> &'static str {
        match self {
            ParameterField::Spot => "Spot Price",
            ParameterField::Strike => "Strike Price",
            ParameterField::Volatility => "Volatility",
            ParameterField::TimeToMaturity => "Time to Maturity",
            ParameterField::InterestRate => "Risk-Free Rate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterField::Spot => "spot",
            ParameterField::Strike => "strike",
            ParameterField::Volatility => "volatility",
            ParameterField::TimeToMaturity => "time_to_maturity",
            ParameterField::InterestRate => "interest_rate",
        }
    }

    /// Reads this field from a parameter set.
    pub fn get(&self, params: &OptionParameters) -> f64 {
        match self {
            ParameterField::Spot => params.current_price(),
            ParameterField::Strike => params.strike(),
            ParameterField::Volatility => params.volatility(),
            ParameterField::TimeToMaturity => params.time_to_maturity(),
            ParameterField::InterestRate => params.interest_rate(),
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterField {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" | "current_price" => Ok(ParameterField::Spot),
            "strike" => Ok(ParameterField::Strike),
            "volatility" | "vol" => Ok(ParameterField::Volatility),
            "time_to_maturity" | "ttm" => Ok(ParameterField::TimeToMaturity),
            "interest_rate" | "rate" => Ok(ParameterField::InterestRate),
            other => Err(PricingError::configuration(format!(
                "unknown parameter field: {other}"
            ))),
        }
    }
}

/// Which value of a [`PricingResult`] a sweep collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    CallPrice,
    PutPrice,
    CallDelta,
    PutDelta,
    Gamma,
    D1,
    D2,
}

impl OutputField {
    pub fn label(&self) -> &'static str {
        match self {
            OutputField::CallPrice => "Call Price",
            OutputField::PutPrice => "Put Price",
            OutputField::CallDelta => "Call Delta",
            OutputField::PutDelta => "Put Delta",
            OutputField::Gamma => "Gamma",
            OutputField::D1 => "d1",
            OutputField::D2 => "d2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputField::CallPrice => "call_price",
            OutputField::PutPrice => "put_price",
            OutputField::CallDelta => "call_delta",
            OutputField::PutDelta => "put_delta",
            OutputField::Gamma => "gamma",
            OutputField::D1 => "d1",
            OutputField::D2 => "d2",
        }
    }

    /// Extracts this field from a pricing result.
    pub fn select(&self, result: &PricingResult) -> f64 {
        match self {
            OutputField::CallPrice => result.call_price,
            OutputField::PutPrice => result.put_price,
            OutputField::CallDelta => result.call_delta,
            OutputField::PutDelta => result.put_delta,
            OutputField::Gamma => result.gamma,
            OutputField::D1 => result.d1,
            OutputField::D2 => result.d2,
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputField {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call_price" | "call" => Ok(OutputField::CallPrice),
            "put_price" | "put" => Ok(OutputField::PutPrice),
            "call_delta" => Ok(OutputField::CallDelta),
            "put_delta" => Ok(OutputField::PutDelta),
            "gamma" => Ok(OutputField::Gamma),
            "d1" => Ok(OutputField::D1),
            "d2" => Ok(OutputField::D2),
            other => Err(PricingError::configuration(format!(
                "unknown output field: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_names() {
        for field in ParameterField::ALL {
            assert_eq!(field.as_str().parse::<ParameterField>().unwrap(), field);
        }
        assert_eq!("vol".parse::<ParameterField>().unwrap(), ParameterField::Volatility);
        assert!("dividend".parse::<ParameterField>().is_err());
        assert_eq!("put".parse::<OutputField>().unwrap(), OutputField::PutPrice);
    }

    #[test]
    fn test_get_reads_matching_field() {
        let p = OptionParameters::new(0.5, 95.0, 101.0, 0.3, 0.02).unwrap();
        assert_eq!(ParameterField::Spot.get(&p), 101.0);
        assert_eq!(ParameterField::Strike.get(&p), 95.0);
        assert_eq!(ParameterField::Volatility.get(&p), 0.3);
        assert_eq!(ParameterField::TimeToMaturity.get(&p), 0.5);
        assert_eq!(ParameterField::InterestRate.get(&p), 0.02);
    }
}
