//! # Withdrawal Eligibility
//!
//! Derives withdrawal eligibility and remaining lock time from raw
//! timestamps. Exactly at the unlock boundary the position is eligible.

use stakeview_core::types::{EligibilityResult, StakePosition};

/// Timestamp-based eligibility evaluation
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    /// Evaluate a position at `now`.
    ///
    /// `unlock_at = last_stake_timestamp + lock_period_secs`;
    /// `can_withdraw` is inclusive at the boundary. A zero
    /// `last_stake_timestamp` means no position exists yet: withdrawal is
    /// disallowed and the full lock period is reported as remaining.
    pub fn evaluate(
        last_stake_timestamp: i64,
        lock_period_secs: i64,
        now: i64,
    ) -> EligibilityResult {
        if last_stake_timestamp == 0 {
            return EligibilityResult {
                can_withdraw: false,
                time_until_unlock_secs: lock_period_secs.max(0) as u64,
            };
        }

        let unlock_at = last_stake_timestamp.saturating_add(lock_period_secs);

        EligibilityResult {
            can_withdraw: now >= unlock_at,
            time_until_unlock_secs: unlock_at.saturating_sub(now).max(0) as u64,
        }
    }

    /// Evaluate a contract-read stake position at `now`.
    pub fn evaluate_position(position: &StakePosition, now: i64) -> EligibilityResult {
        Self::evaluate(position.last_stake_timestamp, position.lock_period_secs, now)
    }
}
