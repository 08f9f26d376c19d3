//! Grid sweep evaluator: runs the pricing engine over every combination of
//! two axis values and collects the chosen output into a matrix.

use crate::error::{PricingError, Result};
use crate::models::bs::{price, OptionParameters};

use super::types::*;

fn validate_axes(axis_x: &Axis, axis_y: &Axis) -> Result<()> {
    if axis_x.field == axis_y.field {
        return Err(PricingError::configuration(format!(
            "sweep axes must vary different fields, both are '{}'",
            axis_x.field
        )));
    }
    if axis_x.is_empty() || axis_y.is_empty() {
        return Err(PricingError::configuration(format!(
            "sweep axes need at least one value (x '{}': {}, y '{}': {})",
            axis_x.field,
            axis_x.len(),
            axis_y.field,
            axis_y.len()
        )));
    }
    Ok(())
}

/// Evaluate `output` over the `axis_y × axis_x` grid around `base`.
///
/// Row `i` follows `axis_y.values[i]`, column `j` follows `axis_x.values[j]`.
///
/// # Errors
///
/// * [`PricingError::Configuration`] if both axes name the same field or
///   either axis is empty
/// * [`PricingError::InvalidParameter`] from the first cell whose derived
///   parameters are invalid; no partial matrix is returned
pub fn sweep(
    base: OptionParameters,
    axis_x: &Axis,
    axis_y: &Axis,
    output: OutputField,
) -> Result<SweepMatrix> {
    let mut matrices = sweep_many(base, axis_x, axis_y, &[output])?;
    matrices
        .pop()
        .ok_or_else(|| PricingError::configuration("sweep produced no matrix"))
}

/// Like [`sweep`] but fills one matrix per entry of `outputs`, pricing each
/// cell only once.
pub fn sweep_many(
    base: OptionParameters,
    axis_x: &Axis,
    axis_y: &Axis,
    outputs: &[OutputField],
) -> Result<Vec<SweepMatrix>> {
    validate_axes(axis_x, axis_y)?;
    if outputs.is_empty() {
        return Err(PricingError::configuration(
            "at least one output field is required",
        ));
    }

    let mut grids: Vec<Vec<Vec<f64>>> = vec![Vec::with_capacity(axis_y.len()); outputs.len()];

    for &y in &axis_y.values {
        let row_params = base.with_field(axis_y.field, y)?;
        let mut rows: Vec<Vec<f64>> = vec![Vec::with_capacity(axis_x.len()); outputs.len()];

        for &x in &axis_x.values {
            let cell = price(row_params.with_field(axis_x.field, x)?)?;
            for (row, field) in rows.iter_mut().zip(outputs) {
                row.push(field.select(&cell));
            }
        }

        for (grid, row) in grids.iter_mut().zip(rows) {
            grid.push(row);
        }
    }

    Ok(outputs
        .iter()
        .zip(grids)
        .map(|(&output, values)| SweepMatrix {
            x_axis: axis_x.clone(),
            y_axis: axis_y.clone(),
            output,
            values,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> OptionParameters {
        OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap()
    }

    #[test]
    fn test_single_point_sweep() {
        let x = Axis::new(ParameterField::Spot, vec![100.0]);
        let y = Axis::new(ParameterField::Volatility, vec![0.2]);
        let m = sweep(base(), &x, &y, OutputField::CallPrice).unwrap();
        assert_eq!((m.rows(), m.cols()), (1, 1));
        assert!((m.get(0, 0).unwrap() - 10.4506).abs() < 1e-4);
    }

    #[test]
    fn test_empty_axis_rejected() {
        let x = Axis::new(ParameterField::Spot, vec![]);
        let y = Axis::new(ParameterField::Volatility, vec![0.2]);
        let err = sweep(base(), &x, &y, OutputField::Gamma).unwrap_err();
        assert!(matches!(err, PricingError::Configuration(_)));
    }

    #[test]
    fn test_row_override_error_propagates() {
        // y value invalid before any x cell is evaluated
        let x = Axis::new(ParameterField::Spot, vec![90.0, 100.0]);
        let y = Axis::new(ParameterField::TimeToMaturity, vec![1.0, -1.0]);
        let err = sweep(base(), &x, &y, OutputField::PutPrice).unwrap_err();
        assert_eq!(err.field(), Some("time_to_maturity"));
    }

    #[test]
    fn test_sweep_many_shares_cells() {
        let x = Axis::new(ParameterField::Spot, vec![90.0, 100.0, 110.0]);
        let y = Axis::new(ParameterField::Volatility, vec![0.1, 0.3]);
        let ms = sweep_many(
            base(),
            &x,
            &y,
            &[OutputField::CallPrice, OutputField::PutPrice],
        )
        .unwrap();
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].output, OutputField::CallPrice);
        assert_eq!(ms[1].output, OutputField::PutPrice);

        let single = sweep(base(), &x, &y, OutputField::PutPrice).unwrap();
        assert_eq!(ms[1].values, single.values);
    }
}
