#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the score formula.
//!
//! Invariants tested:
//! - The score equals floor(amount · (50 + weeks) / 51) exactly
//! - Multiples of 51 are scored additively for every duration
//! - Any amounts are scored additively when the ratio is a whole number
//! - Splitting a stake never loses more than one unit of score
//! - A one-week lock scores exactly the amount
//! - Longer locks never score less

use proptest::prelude::*;
use staking::score::{compute_score, DENOMINATOR};

const ONE_TOKEN: i128 = 1_000_000_000_000_000_000;
const MAX_AMOUNT: i128 = 1_000_000_000 * ONE_TOKEN;

proptest! {
    #[test]
    fn prop_matches_exact_rational(amount in 0i128..MAX_AMOUNT, weeks in 1u32..=520u32) {
        let exact = amount * (50 + weeks as i128) / 51;
        prop_assert_eq!(compute_score(amount, weeks).unwrap(), exact);
    }

    /// score(a1, w) + score(a2, w) == score(a1 + a2, w) for multiples of 51.
    #[test]
    fn prop_additivity_for_multiples_of_denominator(
        k1 in 0i128..MAX_AMOUNT / 51,
        k2 in 0i128..MAX_AMOUNT / 51,
        weeks in 1u32..=520u32,
    ) {
        let (a1, a2) = (k1 * DENOMINATOR, k2 * DENOMINATOR);
        let s1 = compute_score(a1, weeks).unwrap();
        let s2 = compute_score(a2, weeks).unwrap();
        let both = compute_score(a1 + a2, weeks).unwrap();
        prop_assert_eq!(s1 + s2, both);
    }

    /// Durations of 1, 52, 103, … weeks have whole ratios, so every amount
    /// adds exactly.
    #[test]
    fn prop_additivity_for_whole_ratios(
        a1 in 0i128..MAX_AMOUNT,
        a2 in 0i128..MAX_AMOUNT,
        years in 0u32..10u32,
    ) {
        let weeks = 1 + 51 * years;
        let s1 = compute_score(a1, weeks).unwrap();
        let s2 = compute_score(a2, weeks).unwrap();
        let both = compute_score(a1 + a2, weeks).unwrap();
        prop_assert_eq!(s1 + s2, both);
        prop_assert_eq!(both, (a1 + a2) * (years as i128 + 1));
    }

    #[test]
    fn prop_split_loses_at_most_one_unit(
        a1 in 0i128..MAX_AMOUNT,
        a2 in 0i128..MAX_AMOUNT,
        weeks in 1u32..=520u32,
    ) {
        let split = compute_score(a1, weeks).unwrap() + compute_score(a2, weeks).unwrap();
        let both = compute_score(a1 + a2, weeks).unwrap();
        prop_assert!(split <= both);
        prop_assert!(both - split <= 1, "split {} both {}", split, both);
    }

    #[test]
    fn prop_one_week_is_identity(amount in 0i128..MAX_AMOUNT) {
        prop_assert_eq!(compute_score(amount, 1).unwrap(), amount);
    }

    #[test]
    fn prop_monotonic_in_weeks(amount in 0i128..MAX_AMOUNT, weeks in 1u32..=519u32) {
        let shorter = compute_score(amount, weeks).unwrap();
        let longer = compute_score(amount, weeks + 1).unwrap();
        prop_assert!(shorter <= longer);
    }
}
