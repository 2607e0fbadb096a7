//! Property-based tests using proptest.
//!
//! These tests verify invariant properties across random inputs rather than
//! testing fixed examples: put-call parity on every pricing branch, price
//! bounds, N(x) shape, surface monotonicity and FIFO quantity conservation.

use bsm_pricer::conventions::present_value;
use bsm_pricer::portfolio::{Trade, apply_trades_fifo};
use bsm_pricer::pricing::{norm_cdf, price_checked};
use bsm_pricer::surface::{linspace, value_surface};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

/// Vol strategy that hits the exact `sigma = 0` branch as well as the closed form.
fn vol_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 4 => 0.01_f64..2.0]
}

/// Expiry strategy that hits the exact `T = 0` branch as well.
fn expiry_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 4 => 0.01_f64..10.0]
}

/// Vol down to subnormal magnitudes, where `sigma·√T` underflows.
fn tiny_vol_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 1 => 1e-320_f64..1e-300, 3 => 0.01_f64..2.0]
}

/// Expiry down to subnormal magnitudes.
fn tiny_expiry_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(0.0), 1 => 1e-320_f64..1e-300, 3 => 0.01_f64..10.0]
}

// --- Property Test 1: put-call parity on all branches ---

proptest! {
    /// C − P = S − K·e^(−rT) whether the result came from the payoff, the
    /// zero-vol limit or the closed form.
    #[test]
    fn put_call_parity_holds(
        s in 1.0_f64..500.0,
        k in 1.0_f64..500.0,
        sigma in tiny_vol_strategy(),
        t in tiny_expiry_strategy(),
        r in -0.05_f64..0.20,
    ) {
        let p = price_checked(s, k, sigma, t, r).unwrap();
        prop_assert!(p.call.is_finite() && p.put.is_finite());
        let rhs = s - present_value(k, r, t);
        let tol = 1e-9 * (1.0 + s + k);
        prop_assert!(
            (p.call - p.put - rhs).abs() < tol,
            "parity off by {} at S={s} K={k} sigma={sigma} T={t} r={r}",
            p.call - p.put - rhs
        );
    }
}

// --- Property Test 2: price bounds ---

proptest! {
    /// Call and put are non-negative, the call never exceeds spot and the
    /// put never exceeds the discounted strike.
    #[test]
    fn prices_are_bounded(
        s in 1.0_f64..500.0,
        k in 1.0_f64..500.0,
        sigma in tiny_vol_strategy(),
        t in tiny_expiry_strategy(),
        r in -0.05_f64..0.20,
    ) {
        let p = price_checked(s, k, sigma, t, r).unwrap();
        prop_assert!(p.call.is_finite() && p.put.is_finite());
        prop_assert!(p.d1.is_none_or(f64::is_finite) && p.d2.is_none_or(f64::is_finite));
        let tol = 1e-9 * (1.0 + s + k);
        prop_assert!(p.call >= -tol, "call = {}", p.call);
        prop_assert!(p.put >= -tol, "put = {}", p.put);
        prop_assert!(p.call <= s + tol);
        prop_assert!(p.put <= present_value(k, r, t) + tol);
    }
}

// --- Property Test 3: d1/d2 only on the closed-form branch ---

proptest! {
    #[test]
    fn d1_d2_present_only_for_closed_form(
        sigma in vol_strategy(),
        t in expiry_strategy(),
    ) {
        let p = price_checked(100.0, 100.0, sigma, t, 0.05).unwrap();
        let closed_form = sigma > 0.0 && t > 0.0;
        prop_assert_eq!(p.d1.is_some(), closed_form);
        prop_assert_eq!(p.d2.is_some(), closed_form);
    }
}

// --- Property Test 4: normal CDF shape ---

proptest! {
    #[test]
    fn norm_cdf_is_symmetric_and_bounded(x in -40.0_f64..40.0) {
        let n = norm_cdf(x);
        prop_assert!((0.0..=1.0).contains(&n));
        prop_assert!((norm_cdf(-x) - (1.0 - n)).abs() < 1e-14);
    }

    #[test]
    fn norm_cdf_is_monotone(x in -10.0_f64..10.0, dx in 0.0_f64..5.0) {
        prop_assert!(norm_cdf(x) <= norm_cdf(x + dx) + 1e-15);
    }
}

// --- Property Test 5: surface monotonicity ---

proptest! {
    /// Call values rise along the spot axis and along the vol axis; put
    /// values fall along spot and rise along vol.
    #[test]
    fn surface_is_monotone_in_spot_and_vol(
        k in 50.0_f64..150.0,
        t in 0.05_f64..3.0,
        r in 0.0_f64..0.10,
        n_spot in 2_usize..12,
        n_vol in 2_usize..8,
    ) {
        let spots = linspace(0.5 * k, 1.5 * k, n_spot);
        let vols = linspace(0.0, 0.8, n_vol);
        let surface = value_surface(&spots, &vols, k, t, r).unwrap();
        prop_assert_eq!(surface.shape(), (n_vol, n_spot));

        let tol = 1e-9 * (1.0 + k);
        let (call, put) = (surface.call(), surface.put());
        for i in 0..n_vol {
            for j in 1..n_spot {
                prop_assert!(call[i][j] + tol >= call[i][j - 1]);
                prop_assert!(put[i][j] <= put[i][j - 1] + tol);
            }
        }
        for j in 0..n_spot {
            for i in 1..n_vol {
                prop_assert!(call[i][j] + tol >= call[i - 1][j]);
                prop_assert!(put[i][j] + tol >= put[i - 1][j]);
            }
        }
    }

    /// A spot axis that is not strictly increasing is always rejected.
    #[test]
    fn surface_rejects_unordered_spot_axis(a in 1.0_f64..200.0, b in 1.0_f64..200.0) {
        prop_assume!(a >= b);
        prop_assert!(value_surface(&[a, b], &[0.2], 100.0, 1.0, 0.05).is_err());
    }
}

// --- Property Test 6: FIFO quantity conservation ---

proptest! {
    /// Open quantity after a batch equals bought minus sold, and realized PnL
    /// on a batch with one price level and no fees is zero.
    #[test]
    fn fifo_conserves_quantity(steps in prop::collection::vec((any::<bool>(), 1_u32..10), 1..40)) {
        let mut inventory = 0.0_f64;
        let trades: Vec<Trade> = steps
            .iter()
            .enumerate()
            .map(|(i, &(sell, qty))| {
                let ts = Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap();
                let qty = f64::from(qty);
                if sell && qty <= inventory {
                    inventory -= qty;
                    Trade::sell("XYZ", ts, qty, 10.0)
                } else {
                    inventory += qty;
                    Trade::buy("XYZ", ts, qty, 10.0)
                }
            })
            .collect();

        let (lots, realized) = apply_trades_fifo(&trades).unwrap();
        let open: f64 = lots.iter().map(|l| l.qty).sum();
        prop_assert_eq!(open, inventory);
        prop_assert!(lots.iter().all(|l| l.qty > 0.0));
        prop_assert_eq!(realized.realized, 0.0);
    }
}
