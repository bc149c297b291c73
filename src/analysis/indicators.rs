//! Forward projection of indicator values for the `compute_metric_updates` stage.

use super::types::{IndicatorDelta, IndicatorSet};

/// Inclusive bounds applied to projected inflation.
pub const INFLATION_BOUNDS: (f64, f64) = (0.0, 20.0);
/// Lower bound applied to the projected exchange rate; there is no upper bound.
pub const EXCHANGE_RATE_FLOOR: f64 = 0.1;
/// Inclusive bounds applied to the projected interest rate.
pub const INTEREST_RATE_BOUNDS: (f64, f64) = (0.0, 15.0);
/// Decimal places kept for percentage indicators.
pub const PERCENT_PRECISION: usize = 2;
/// Decimal places kept for the exchange rate.
pub const EXCHANGE_RATE_PRECISION: usize = 4;

/// Apply each percentage change to its prior value, clamp, then round.
///
/// Clamping happens before rounding, so a raw inflation of `20.004` becomes exactly `20.0`.
/// Non-finite inputs are not guarded and propagate into the result.
pub fn project(delta: &IndicatorDelta) -> IndicatorSet {
    let prior = delta.prior;
    let inflation = apply_change(prior.inflation, delta.inflation_pct)
        .clamp(INFLATION_BOUNDS.0, INFLATION_BOUNDS.1);
    let exchange_rate = floor_at(
        apply_change(prior.exchange_rate, delta.exchange_rate_pct),
        EXCHANGE_RATE_FLOOR,
    );
    let interest_rate = apply_change(prior.interest_rate, delta.interest_rate_pct)
        .clamp(INTEREST_RATE_BOUNDS.0, INTEREST_RATE_BOUNDS.1);

    IndicatorSet {
        inflation: round_to(inflation, PERCENT_PRECISION),
        exchange_rate: round_to(exchange_rate, EXCHANGE_RATE_PRECISION),
        interest_rate: round_to(interest_rate, PERCENT_PRECISION),
    }
}

fn apply_change(prior: f64, pct: f64) -> f64 {
    prior * (1.0 + pct / 100.0)
}

// `f64::max` would swallow NaN; keep it visible to the caller.
fn floor_at(value: f64, floor: f64) -> f64 {
    if value < floor { floor } else { value }
}

/// Round the exact binary value to `places` decimals, ties to even: `2.675` becomes `2.67`.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(pcts: (f64, f64, f64), prior: (f64, f64, f64)) -> IndicatorDelta {
        IndicatorDelta {
            inflation_pct: pcts.0,
            exchange_rate_pct: pcts.1,
            interest_rate_pct: pcts.2,
            prior: IndicatorSet {
                inflation: prior.0,
                exchange_rate: prior.1,
                interest_rate: prior.2,
            },
        }
    }

    #[test]
    fn applies_percentage_changes() {
        let projected = project(&delta((10.0, 20.0, -10.0), (2.0, 0.6, 4.5)));
        assert_eq!(projected.inflation, 2.2);
        assert_eq!(projected.exchange_rate, 0.72);
        assert_eq!(projected.interest_rate, 4.05);
    }

    #[test]
    fn zero_change_returns_rounded_priors() {
        let projected = project(&delta((0.0, 0.0, 0.0), (3.14159, 1.123456, 4.5678)));
        assert_eq!(projected.inflation, 3.14);
        assert_eq!(projected.exchange_rate, 1.1235);
        assert_eq!(projected.interest_rate, 4.57);
    }

    #[test]
    fn clamps_to_upper_bounds() {
        let projected = project(&delta((100.0, 0.0, 100.0), (15.0, 1.0, 9.0)));
        assert_eq!(projected.inflation, 20.0);
        assert_eq!(projected.interest_rate, 15.0);
    }

    #[test]
    fn clamps_values_just_above_bounds() {
        let projected = project(&delta((0.0, 0.0, 0.0), (20.006, 1.0, 15.006)));
        assert_eq!(projected.inflation, 20.0);
        assert_eq!(projected.interest_rate, 15.0);
    }

    #[test]
    fn clamps_to_lower_bounds() {
        let projected = project(&delta((-200.0, -99.0, -150.0), (3.0, 1.0, 4.0)));
        assert_eq!(projected.inflation, 0.0);
        assert_eq!(projected.exchange_rate, 0.1);
        assert_eq!(projected.interest_rate, 0.0);
    }

    #[test]
    fn exchange_rate_has_no_upper_bound() {
        let projected = project(&delta((0.0, 100.0, 0.0), (2.0, 50.0, 3.0)));
        assert_eq!(projected.exchange_rate, 100.0);
    }

    #[test]
    fn rounds_exact_binary_values_half_to_even() {
        let projected = project(&delta((0.0, 0.0, 0.0), (0.125, 1.00005, 2.675)));
        assert_eq!(projected.inflation, 0.12);
        assert_eq!(projected.exchange_rate, 1.0001);
        assert_eq!(projected.interest_rate, 2.67);

        let projected = project(&delta((0.0, 0.0, 0.0), (0.375, 1.23455, 4.005)));
        assert_eq!(projected.inflation, 0.38);
        assert_eq!(projected.exchange_rate, 1.2346);
        assert_eq!(projected.interest_rate, 4.0);
    }

    #[test]
    fn nan_inputs_propagate() {
        let projected = project(&delta((f64::NAN, f64::NAN, 0.0), (2.0, 1.0, 3.0)));
        assert!(projected.inflation.is_nan());
        assert!(projected.exchange_rate.is_nan());
        assert_eq!(projected.interest_rate, 3.0);
    }
}
