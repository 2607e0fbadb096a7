//! Discounting and moneyness conventions.
//!
//! Rates are continuously compounded and times are year fractions, so the
//! discount factor over `T` years is `exp(−r · T)`.

/// Discount factor D = exp(−r · T).
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Present value of a strike paid at expiry: PV(K) = K · exp(−r · T).
pub fn present_value(strike: f64, rate: f64, expiry: f64) -> f64 {
    strike * discount_factor(rate, expiry)
}

/// Convert a strike to log-moneyness against spot: ln(S / K).
pub fn log_moneyness(spot: f64, strike: f64) -> f64 {
    (spot / strike).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn discount_at_zero_time_is_one() {
        assert_eq!(discount_factor(0.05, 0.0), 1.0);
    }

    #[test]
    fn negative_rate_grows_pv() {
        assert!(present_value(100.0, -0.01, 1.0) > 100.0);
    }

    #[test]
    fn pv_matches_closed_form() {
        assert_abs_diff_eq!(
            present_value(100.0, 0.05, 1.0),
            100.0 * (-0.05_f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn atm_log_moneyness_is_zero() {
        assert_eq!(log_moneyness(100.0, 100.0), 0.0);
    }
}
