pub mod bs;

/// Numerical helpers shared by the pricing engine and the grid sweep
pub mod utils {
    use statrs::function::erf::erfc;
    use std::f64::consts::{PI, SQRT_2};

    /// Standard normal cumulative distribution function Φ(x).
    ///
    /// Evaluated as `0.5 * erfc(-x / √2)` so the lower tail keeps full
    /// relative precision.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * erfc(-x / SQRT_2)
    }

    /// Standard normal probability density function φ(x).
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculate log-moneyness: ln(S/K)
    pub fn log_moneyness(spot: f64, strike: f64) -> f64 {
        (spot / strike).ln()
    }

    /// `n` evenly spaced values from `start` to `end`, both endpoints exact.
    ///
    /// `n == 0` yields an empty vector and `n == 1` yields `[start]`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        }
    }

}
