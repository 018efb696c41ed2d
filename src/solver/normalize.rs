//! Conversion of a real solution vector to minimal integer ratios.

use crate::error::{BalanceError, Result};

use super::INTEGER_TOLERANCE;

/// Scale `values` to the smallest integer vector with the same ratios.
///
/// Entries with magnitude at or below `zero_tolerance` times the largest
/// magnitude are treated as zero. The vector is divided by its smallest
/// non-zero magnitude, multiplied by the smallest `k <= max_multiplier`
/// that makes every entry integral, rounded and divided by the gcd of
/// the entries. A vector with no positive entries is negated.
///
/// Zero entries are returned as zero; mixed signs are an error.
pub fn integer_ratios(values: &[f64], zero_tolerance: f64, max_multiplier: u64) -> Result<Vec<i64>> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(BalanceError::NonFiniteSolution);
    }

    let largest = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if largest == 0.0 {
        return Err(BalanceError::DegenerateSolution);
    }
    let snapped: Vec<f64> = values
        .iter()
        .map(|&v| if v.abs() <= zero_tolerance * largest { 0.0 } else { v })
        .collect();

    let smallest = snapped
        .iter()
        .filter(|v| **v != 0.0)
        .fold(f64::INFINITY, |m, v| m.min(v.abs()));
    let scaled: Vec<f64> = snapped.iter().map(|v| v / smallest).collect();

    let multiplier = (1..=max_multiplier.max(1))
        .find(|&k| scaled.iter().all(|&v| is_integral(v * k as f64)))
        .ok_or(BalanceError::NoIntegerSolution {
            limit: max_multiplier,
        })?;

    let mut integers = Vec::with_capacity(scaled.len());
    for v in &scaled {
        let rounded = (v * multiplier as f64).round();
        if rounded.abs() >= i64::MAX as f64 {
            return Err(BalanceError::CoefficientOverflow);
        }
        integers.push(rounded as i64);
    }

    let divisor = integers.iter().fold(0u64, |g, &n| gcd(g, n.unsigned_abs()));
    if divisor > 1 {
        // divisor divides every entry, so it fits in i64
        let divisor = divisor as i64;
        for n in &mut integers {
            *n /= divisor;
        }
    }

    if !integers.iter().any(|&n| n > 0) {
        for n in &mut integers {
            *n = -*n;
        }
    }
    if integers.iter().any(|&n| n < 0) {
        return Err(BalanceError::MixedSigns);
    }

    Ok(integers)
}

fn is_integral(v: f64) -> bool {
    (v - v.round()).abs() <= INTEGER_TOLERANCE
}

/// Greatest common divisor; `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios(values: &[f64]) -> Result<Vec<i64>> {
        integer_ratios(values, 1e-9, 1000)
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(1, 9), 1);
    }

    #[test]
    fn test_halves() {
        assert_eq!(ratios(&[1.0, 0.5, 1.0]).unwrap(), vec![2, 1, 2]);
    }

    #[test]
    fn test_needs_multiplier() {
        // Fe + O2 -> Fe2O3 with Fe2O3 fixed to 1
        assert_eq!(ratios(&[2.0, 1.5, 1.0]).unwrap(), vec![4, 3, 2]);
        assert_eq!(ratios(&[1.0 / 3.0, 1.0]).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_reduces_by_gcd() {
        assert_eq!(ratios(&[4.0, 6.0, 2.0]).unwrap(), vec![2, 3, 1]);
    }

    #[test]
    fn test_negated_vector() {
        assert_eq!(ratios(&[-2.0, -1.0]).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_numerical_noise() {
        assert_eq!(
            ratios(&[0.5000000000001, 0.9999999999998, 1e-17, 1.0]).unwrap(),
            vec![1, 2, 0, 2]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(ratios(&[0.0, 0.0]).unwrap_err(), BalanceError::DegenerateSolution);
        assert_eq!(
            ratios(&[f64::NAN, 1.0]).unwrap_err(),
            BalanceError::NonFiniteSolution
        );
        assert_eq!(ratios(&[-1.0, 1.0]).unwrap_err(), BalanceError::MixedSigns);
        assert_eq!(
            integer_ratios(&[1.0, std::f64::consts::PI], 1e-9, 100).unwrap_err(),
            BalanceError::NoIntegerSolution { limit: 100 }
        );
    }
}
