//! Immutable per-tick chain state snapshots
//!
//! Raw contract reads enter the system as explicit `Option`s: `None` records
//! that a read was missing or failed, so a genuine read failure is never
//! silently masked at the boundary. The conversion to zero happens at the
//! single point where reads enter the calculation layer, not here.

use crate::types::TokenAmount;
use serde::{Deserialize, Serialize};

/// Protocol-wide contract reads for one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolReads {
    /// Total staked across all users, base units
    pub total_staked: Option<TokenAmount>,

    /// Raw reward rate from the contract, not further interpreted
    pub current_reward_rate: Option<u128>,

    /// Total pending rewards across all users, base units
    pub total_rewards: Option<TokenAmount>,
}

/// Per-user contract and token reads for one poll.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserReads {
    /// User's staked amount, base units
    pub staked_amount: Option<TokenAmount>,

    /// Unix timestamp of the user's most recent stake
    pub last_stake_timestamp: Option<i64>,

    /// User's pending rewards, base units
    pub pending_rewards: Option<TokenAmount>,

    /// Contract-supplied seconds until unlock, if the contract exposes it
    pub time_until_unlock: Option<u64>,

    /// Contract-supplied withdrawal eligibility, if the contract exposes it
    pub can_withdraw: Option<bool>,

    /// User's liquid token balance, base units
    pub balance: Option<TokenAmount>,

    /// Spending allowance granted to the staking contract, base units
    pub allowance: Option<TokenAmount>,

    /// Token symbol from the token contract
    pub token_symbol: Option<String>,
}

/// One immutable snapshot of everything the display layer consumes.
///
/// Snapshots are recomputed from scratch on every refresh tick; the core has
/// no memory of prior ticks and performs no smoothing or diffing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Monotonically increasing snapshot sequence number
    pub seq: u64,

    /// Wall-clock capture time, Unix seconds
    pub taken_at: i64,

    /// Protocol-wide reads
    pub protocol: ProtocolReads,

    /// Per-user reads, absent when no address is being watched
    pub user: Option<UserReads>,

    /// Approximate claimed-rewards running sum from the history collaborator
    pub claimed_rewards_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reads_are_all_absent() {
        let reads = UserReads::default();

        assert!(reads.staked_amount.is_none());
        assert!(reads.can_withdraw.is_none());
        assert!(reads.token_symbol.is_none());
    }

    #[test]
    fn test_snapshot_serialization_roundtrip() {
        let snapshot = ChainSnapshot {
            seq: 42,
            taken_at: 1_700_000_000,
            protocol: ProtocolReads {
                total_staked: Some(1_000_000_000_000_000_000_000),
                current_reward_rate: None,
                total_rewards: Some(0),
            },
            user: None,
            claimed_rewards_total: 12.5,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: ChainSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.seq, 42);
        assert_eq!(parsed.protocol, snapshot.protocol);
        assert!(parsed.user.is_none());
    }
}
