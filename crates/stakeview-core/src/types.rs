//! Core type definitions for Stakeview
//!
//! All on-chain amounts are non-negative integers denominated in base units
//! of a fixed decimal exponent (18). `u128` covers every representable
//! protocol magnitude well past the 64-bit range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token amount in base units (smallest indivisible representation).
pub type TokenAmount = u128;

/// Annual percentage rate stored in basis points (1% = 100 bps).
///
/// Fixed-point so the APR curve stays in integer math end to end; percent
/// floats only materialize at display time.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AprRate(u64);

impl AprRate {
    /// Create a rate from basis points
    pub const fn from_bps(bps: u64) -> Self {
        Self(bps)
    }

    /// Raw basis points
    pub const fn bps(&self) -> u64 {
        self.0
    }

    /// Whole percentage points, fraction truncated
    pub const fn whole_percent(&self) -> u64 {
        self.0 / 100
    }

    /// Rate as a floating-point percentage (249.5 for 24_950 bps)
    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Debug for AprRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AprRate({}bps)", self.0)
    }
}

impl fmt::Display for AprRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", self.0 / 100)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", self.0 / 100, frac / 10)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, frac)
        }
    }
}

/// A user's stake position as read from the staking contract.
///
/// Created and updated only by contract state; read-only in this layer.
/// `last_stake_timestamp == 0` means the user has never staked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Staked amount in base units
    pub staked_amount: TokenAmount,

    /// Unix timestamp of the most recent stake
    pub last_stake_timestamp: i64,

    /// Lock duration after each stake, in seconds
    pub lock_period_secs: i64,
}

impl StakePosition {
    /// Timestamp at which the position unlocks
    pub fn unlock_at(&self) -> i64 {
        self.last_stake_timestamp.saturating_add(self.lock_period_secs)
    }

    /// Whether the position can be withdrawn at `now` (boundary inclusive)
    pub fn is_unlocked(&self, now: i64) -> bool {
        self.last_stake_timestamp != 0 && now >= self.unlock_at()
    }
}

/// Pending and historical rewards for one user.
///
/// `pending_rewards` is authoritative and exact; `claimed_rewards_total` is
/// an approximate running sum maintained by an external transaction-history
/// collaborator. Any aggregate over both is a best-effort display value, not
/// an accounting-grade total.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardLedger {
    /// Rewards accrued on-chain but not yet claimed, in base units
    pub pending_rewards: TokenAmount,

    /// Externally tracked sum of rewards already withdrawn
    pub claimed_rewards_total: f64,
}

/// Withdrawal eligibility derived from a stake position. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Whether withdrawal is allowed right now
    pub can_withdraw: bool,

    /// Seconds until the lock expires, zero once unlocked
    pub time_until_unlock_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apr_rate_display() {
        assert_eq!(AprRate::from_bps(25_000).to_string(), "250%");
        assert_eq!(AprRate::from_bps(24_950).to_string(), "249.5%");
        assert_eq!(AprRate::from_bps(1_005).to_string(), "10.05%");
        assert_eq!(AprRate::from_bps(0).to_string(), "0%");
    }

    #[test]
    fn test_apr_rate_percent() {
        assert_eq!(AprRate::from_bps(24_950).as_percent(), 249.5);
        assert_eq!(AprRate::from_bps(1_000).whole_percent(), 10);
    }

    #[test]
    fn test_position_unlock_boundary() {
        let position = StakePosition {
            staked_amount: 1,
            last_stake_timestamp: 1_000,
            lock_period_secs: 90,
        };

        assert_eq!(position.unlock_at(), 1_090);
        assert!(!position.is_unlocked(1_089));
        assert!(position.is_unlocked(1_090));
        assert!(position.is_unlocked(1_091));
    }

    #[test]
    fn test_never_staked_position_stays_locked() {
        let position = StakePosition {
            staked_amount: 0,
            last_stake_timestamp: 0,
            lock_period_secs: 90,
        };

        // Timestamp zero means no position exists yet
        assert!(!position.is_unlocked(i64::MAX));
    }
}
