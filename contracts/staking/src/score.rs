//! Duration-weighted score formula.
//!
//! `score = amount × (1 + (weeks − 1) / 51) = amount × (50 + weeks) / 51`:
//! one week scores the amount itself, 52 weeks score double, and the bonus
//! keeps growing linearly past 52 weeks.
//!
//! The ratio is evaluated exactly over [`DENOMINATOR`] and only the final
//! quotient truncates toward zero, so a whole-valued result is never rounded
//! down. Scores add exactly whenever each stake's exact score is whole: every
//! amount for `weeks ≡ 1 (mod 51)`, and every multiple of 51 for any `weeks`.

/// Denominator of the score ratio.
pub const DENOMINATOR: i128 = 51;

/// Numerator of the score ratio for a lock of `weeks`, or `None` for zero
/// weeks.
pub fn numerator(weeks: u32) -> Option<i128> {
    if weeks == 0 {
        return None;
    }
    Some(weeks as i128 + DENOMINATOR - 1)
}

/// Score of `amount` locked for `weeks`.
///
/// Returns `None` for zero weeks or when the product overflows.
pub fn compute_score(amount: i128, weeks: u32) -> Option<i128> {
    let n = numerator(weeks)?;
    // amount = q·51 + r keeps the product inside i128; |r·n| < 51·2^33.
    let q = amount / DENOMINATOR;
    let r = amount % DENOMINATOR;
    q.checked_mul(n)?.checked_add(r * n / DENOMINATOR)
}
