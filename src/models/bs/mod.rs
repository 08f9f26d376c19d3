// src/models/bs/mod.rs

//! Black-Scholes pricing engine for European options (no dividends).
//!
//! Given the five market/contract inputs the engine computes
//!
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2 = d1 − σ·√T
//! call = S·Φ(d1) − K·e^(−rT)·Φ(d2)
//! put  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
//! Δ_call = Φ(d1),  Δ_put = Φ(d1) − 1
//! Γ = φ(d1) / (S·σ·√T)
//! ```
//!
//! The computation is pure: no I/O, no logging, no rounding.

pub mod fields;

pub use fields::{OutputField, ParameterField};

use crate::error::{PricingError, Result};
use crate::models::utils::{log_moneyness, norm_cdf, norm_pdf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market and contract inputs for a single European option.
///
/// Always valid once constructed: every field is finite and time, strike,
/// spot and volatility are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOptionParameters")]
pub struct OptionParameters {
    time_to_maturity: f64,
    strike: f64,
    current_price: f64,
    volatility: f64,
    interest_rate: f64,
}

/// Unvalidated mirror used for deserialization.
#[derive(Deserialize)]
struct RawOptionParameters {
    time_to_maturity: f64,
    strike: f64,
    current_price: f64,
    volatility: f64,
    interest_rate: f64,
}

impl TryFrom<RawOptionParameters> for OptionParameters {
    type Error = PricingError;

    fn try_from(raw: RawOptionParameters) -> Result<Self> {
        OptionParameters::new(
            raw.time_to_maturity,
            raw.strike,
            raw.current_price,
            raw.volatility,
            raw.interest_rate,
        )
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PricingError::InvalidParameter {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(PricingError::InvalidParameter {
            field,
            value,
            reason: "must be > 0",
        });
    }
    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PricingError::InvalidParameter {
            field,
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}

impl OptionParameters {
    /// Creates a validated parameter set.
    pub fn new(
        time_to_maturity: f64,
        strike: f64,
        current_price: f64,
        volatility: f64,
        interest_rate: f64,
    ) -> Result<Self> {
        let params = Self {
            time_to_maturity,
            strike,
            current_price,
            volatility,
            interest_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every domain constraint, reporting the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_positive("time_to_maturity", self.time_to_maturity)?;
        require_positive("strike", self.strike)?;
        require_positive("current_price", self.current_price)?;
        require_positive("volatility", self.volatility)?;
        require_finite("interest_rate", self.interest_rate)?;
        Ok(())
    }

    /// Returns a validated copy with `field` replaced by `value`.
    pub fn with_field(&self, field: ParameterField, value: f64) -> Result<Self> {
        let mut next = *self;
        match field {
            ParameterField::Spot => next.current_price = value,
            ParameterField::Strike => next.strike = value,
            ParameterField::Volatility => next.volatility = value,
            ParameterField::TimeToMaturity => next.time_to_maturity = value,
            ParameterField::InterestRate => next.interest_rate = value,
        }
        next.validate()?;
        Ok(next)
    }

    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// Discount factor e^(−rT).
    pub fn discount_factor(&self) -> f64 {
        (-self.interest_rate * self.time_to_maturity).exp()
    }
}

/// Prices and sensitivities produced by [`price`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub d1: f64,
    pub d2: f64,
    pub call_price: f64,
    pub put_price: f64,
    /// ∂call/∂S, in [0, 1]
    pub call_delta: f64,
    /// ∂put/∂S, in [-1, 0]
    pub put_delta: f64,
    /// ∂²price/∂S², identical for call and put
    pub gamma: f64,
}

impl PricingResult {
    /// Gamma of the call leg (same value as the put).
    pub fn call_gamma(&self) -> f64 {
        self.gamma
    }

    /// Gamma of the put leg (same value as the call).
    pub fn put_gamma(&self) -> f64 {
        self.gamma
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Call: ${:.6} | Put: ${:.6} | Δ (Call): {:.6} | Δ (Put): {:.6} | Γ: {:.6}",
            self.call_price, self.put_price, self.call_delta, self.put_delta, self.gamma
        )
    }
}

/// Evaluates the Black-Scholes formulas for `params`.
///
/// # Errors
///
/// [`PricingError::InvalidParameter`] if any input violates its constraint,
/// or if valid inputs overflow (`ln(S/K)`, `e^(-rT)` or `σ²·T`) and would
/// otherwise yield NaN or infinite outputs. Validation runs before any
/// arithmetic, so a zero `σ·√T` never reaches the division.
pub fn price(params: OptionParameters) -> Result<PricingResult> {
    params.validate()?;

    let s = params.current_price;
    let k = params.strike;
    let t = params.time_to_maturity;
    let sigma = params.volatility;
    let r = params.interest_rate;

    let moneyness = log_moneyness(s, k);
    require_finite_term("current_price", s, "ln(S/K) is not finite", moneyness)?;
    let discounted_strike = k * params.discount_factor();
    require_finite_term("interest_rate", r, "e^(-rT) overflows", discounted_strike)?;
    let variance_term = 0.5 * sigma * sigma * t;
    require_finite_term("volatility", sigma, "σ²·T overflows", variance_term)?;

    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = (moneyness + r * t + variance_term) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;

    let cdf_d1 = norm_cdf(d1);
    let call_price = s * cdf_d1 - discounted_strike * norm_cdf(d2);
    let put_price = discounted_strike * norm_cdf(-d2) - s * norm_cdf(-d1);

    let result = PricingResult {
        d1,
        d2,
        call_price,
        put_price,
        call_delta: cdf_d1,
        put_delta: cdf_d1 - 1.0,
        gamma: norm_pdf(d1) / (s * sigma_sqrt_t),
    };
    let outputs = [
        result.d1,
        result.d2,
        result.call_price,
        result.put_price,
        result.gamma,
    ];
    if outputs.iter().any(|v| !v.is_finite()) {
        return Err(PricingError::InvalidParameter {
            field: "interest_rate",
            value: r,
            reason: "inputs produce a non-finite result",
        });
    }
    Ok(result)
}

fn require_finite_term(field: &'static str, value: f64, reason: &'static str, term: f64) -> Result<()> {
    if term.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter {
            field,
            value,
            reason,
        })
    }
}
