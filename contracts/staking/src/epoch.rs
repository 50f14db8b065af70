//! Weekly epoch arithmetic.
//!
//! Epoch `0` starts at `start_date`; every epoch is exactly one week long.
//! Time is always supplied by the caller (the ledger timestamp).

/// Seconds in one epoch.
pub const ONE_WEEK: u64 = 604_800;

/// Longest reward window accepted by `initialize` (ten years of epochs).
///
/// A stake rewrites one map entry per covered epoch and a user's maps grow to
/// at most `MAX_REWARD_PERIODS + 1` entries, which bounds the host budget of
/// a single `stake` call.
pub const MAX_REWARD_PERIODS: u32 = 520;

/// Epoch index containing `timestamp`, or `None` before `start_date`.
pub fn epoch_at(start_date: u64, timestamp: u64) -> Option<u64> {
    timestamp
        .checked_sub(start_date)
        .map(|elapsed| elapsed / ONE_WEEK)
}

/// Timestamp at which the reward window closes.
pub fn end_date(start_date: u64, reward_periods: u32) -> Option<u64> {
    (reward_periods as u64)
        .checked_mul(ONE_WEEK)
        .and_then(|span| start_date.checked_add(span))
}
