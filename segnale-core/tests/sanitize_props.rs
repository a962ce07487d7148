use proptest::prelude::*;
use segnale_core::stats::quantile::{quantile_sorted, sorted_copy};
use segnale_core::{WinsorConfig, winsorize};

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6f64, 1..200)
}

proptest! {
    #[test]
    fn clipped_values_stay_inside_percentile_band(values in arb_values()) {
        let bounds = WinsorConfig::default();
        let sorted = sorted_copy(&values);
        let lo = quantile_sorted(&sorted, bounds.lower).unwrap();
        let hi = quantile_sorted(&sorted, bounds.upper).unwrap();

        let out = winsorize(&values, bounds);
        prop_assert_eq!(out.len(), values.len());
        for v in out {
            prop_assert!(v >= lo && v <= hi, "{v} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn constant_series_is_unchanged(value in -1.0e6f64..1.0e6f64, n in 1usize..50) {
        let values = vec![value; n];
        prop_assert_eq!(winsorize(&values, WinsorConfig::default()), values);
    }

    #[test]
    fn values_inside_band_are_untouched(values in arb_values()) {
        let bounds = WinsorConfig::default();
        let sorted = sorted_copy(&values);
        let lo = quantile_sorted(&sorted, bounds.lower).unwrap();
        let hi = quantile_sorted(&sorted, bounds.upper).unwrap();

        let out = winsorize(&values, bounds);
        for (before, after) in values.iter().zip(out) {
            if *before >= lo && *before <= hi {
                prop_assert_eq!(*before, after);
            }
        }
    }
}

#[test]
fn empty_series_returns_empty() {
    assert!(winsorize(&[], WinsorConfig::default()).is_empty());
}

#[test]
fn late_outlier_moves_earlier_clipped_values() {
    // global band: appending an extreme point changes the clip of an earlier one
    let mut values: Vec<f64> = (0..100).map(f64::from).collect();
    let before = winsorize(&values, WinsorConfig::default());
    values.push(10_000.0);
    let after = winsorize(&values, WinsorConfig::default());
    assert_ne!(before[99], after[99]);
}

#[test]
fn single_outlier_is_pulled_to_the_upper_percentile() {
    let mut values = vec![1.0; 99];
    values.push(1_000.0);
    let out = winsorize(&values, WinsorConfig::default());
    // p99 of 99 ones and a 1000 is 1 + 0.01 * 999
    assert!((out[99] - 10.99).abs() < 1e-9);
    assert!(out[..99].iter().all(|v| (*v - 1.0).abs() < f64::EPSILON));
}
