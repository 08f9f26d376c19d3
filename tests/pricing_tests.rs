
use scholes_lib::{price, OptionParameters, PricingError};
use test_utils::{assert_close, atm_params, params, sample_parameter_sets};

/// Standard textbook values for the ATM one-year option.
#[test]
fn test_reference_scenario() {
    let r = price(atm_params()).expect("pricing failed");
    assert!(
        (r.call_price - 10.4506).abs() < 1e-4,
        "call should be ~10.4506, got {}",
        r.call_price
    );
    assert!(
        (r.put_price - 5.5735).abs() < 1e-4,
        "put should be ~5.5735, got {}",
        r.put_price
    );
}

/// C − P = S − K·e^(−rT) across the whole sample grid.
#[test]
fn test_put_call_parity() {
    for p in sample_parameter_sets() {
        let r = price(p).unwrap();
        let parity = p.current_price() - p.strike() * p.discount_factor();
        assert_close(
            r.call_price - r.put_price,
            parity,
            1e-9,
            &format!("parity for {:?}", p),
        );
    }
}

#[test]
fn test_delta_bounds_and_gap() {
    for p in sample_parameter_sets() {
        let r = price(p).unwrap();
        assert!(
            (0.0..=1.0).contains(&r.call_delta),
            "call delta out of range: {}",
            r.call_delta
        );
        assert!(
            (-1.0..=0.0).contains(&r.put_delta),
            "put delta out of range: {}",
            r.put_delta
        );
        assert!((r.call_delta - r.put_delta - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_gamma_non_negative_and_shared() {
    for p in sample_parameter_sets() {
        let r = price(p).unwrap();
        assert!(r.gamma >= 0.0, "gamma negative for {:?}", p);
        assert_eq!(r.call_gamma(), r.put_gamma());
    }
}

#[test]
fn test_prices_non_negative() {
    for p in sample_parameter_sets() {
        let r = price(p).unwrap();
        // Allow rounding noise around zero for far OTM contracts
        assert!(r.call_price > -1e-9, "call {} for {:?}", r.call_price, p);
        assert!(r.put_price > -1e-9, "put {} for {:?}", r.put_price, p);
    }
}

/// Call rises and put falls as spot increases.
#[test]
fn test_monotonic_in_spot() {
    for &vol in &[0.1, 0.3] {
        let mut prev: Option<(f64, f64)> = None;
        for step in 0..=40 {
            let spot = 60.0 + step as f64 * 2.0;
            let r = price(params(spot, 100.0, 0.5, vol, 0.03)).unwrap();
            if let Some((call, put)) = prev {
                assert!(r.call_price >= call - 1e-12, "call decreased at spot {}", spot);
                assert!(r.put_price <= put + 1e-12, "put increased at spot {}", spot);
            }
            prev = Some((r.call_price, r.put_price));
        }
    }
}

/// As σ → 0⁺ the call converges to its discounted intrinsic value.
#[test]
fn test_small_volatility_limit() {
    let eps = 1e-6;
    for &(spot, strike) in &[(110.0, 100.0), (90.0, 100.0), (100.0, 104.0)] {
        let p = params(spot, strike, 1.0, eps, 0.05);
        let r = price(p).unwrap();
        let intrinsic = (spot - strike * p.discount_factor()).max(0.0);
        assert!(
            (r.call_price - intrinsic).abs() < 1e-6,
            "S={} K={}: expected {}, got {}",
            spot,
            strike,
            intrinsic,
            r.call_price
        );
    }
}

#[test]
fn test_rejects_invalid_inputs() {
    let cases = [
        (0.0, 100.0, 100.0, 0.2, 0.05, "time_to_maturity"),
        (1.0, -5.0, 100.0, 0.2, 0.05, "strike"),
        (1.0, 100.0, 0.0, 0.2, 0.05, "current_price"),
        (1.0, 100.0, 100.0, 0.0, 0.05, "volatility"),
        (1.0, 100.0, 100.0, 0.2, f64::INFINITY, "interest_rate"),
        (f64::NAN, 100.0, 100.0, 0.2, 0.05, "time_to_maturity"),
    ];
    for (t, k, s, v, r, field) in cases {
        match OptionParameters::new(t, k, s, v, r) {
            Err(PricingError::InvalidParameter { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected InvalidParameter for {}, got {:?}", field, other),
        }
    }
}

#[test]
fn test_d2_relation() {
    let p = params(105.0, 95.0, 0.75, 0.35, 0.01);
    let r = price(p).unwrap();
    assert!((r.d1 - r.d2 - 0.35 * 0.75_f64.sqrt()).abs() < 1e-12);
}

/// Valid but extreme inputs fail instead of returning NaN or ∞.
#[test]
fn test_extreme_inputs_never_yield_non_finite() {
    let cases = [
        (1.0, 100.0, 100.0, 0.2, -1000.0),
        (50.0, 100.0, 100.0, 0.2, -20.0),
        (1.0, 100.0, 100.0, 1e160, 0.05),
        (1e300, 100.0, 100.0, 1e5, 0.0),
        (1.0, 1e-300, 1e300, 0.2, 0.05),
        (1.0, 100.0, 100.0, 0.2, 1e308),
    ];
    for (t, k, s, v, r) in cases {
        let p = OptionParameters::new(t, k, s, v, r).unwrap();
        match price(p) {
            Ok(res) => {
                for value in [res.d1, res.d2, res.call_price, res.put_price, res.gamma] {
                    assert!(value.is_finite(), "non-finite output for {:?}: {:?}", p, res);
                }
                assert!(res.call_price > -1e-9 && res.put_price > -1e-9);
            }
            Err(e) => assert!(
                matches!(e, PricingError::InvalidParameter { .. }),
                "unexpected error {:?}",
                e
            ),
        }
    }

    assert!(matches!(
        price(params(100.0, 100.0, 1.0, 0.2, -1000.0)),
        Err(PricingError::InvalidParameter { field: "interest_rate", .. })
    ));
}
