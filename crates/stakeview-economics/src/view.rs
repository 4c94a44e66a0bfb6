//! # Per-Refresh View Assembly
//!
//! Builds the plain data objects the presentation layer consumes, one per
//! refresh cycle. This is the single point where absent contract reads
//! become zero; upstream they stay `Option`s so read failures remain
//! visible at the boundary.

use crate::apr::AprCurve;
use crate::constants::{DEFAULT_LOCK_PERIOD_SECS, DEFAULT_SYMBOL};
use crate::duration::DurationFormatter;
use crate::eligibility::EligibilityEvaluator;
use crate::rewards::RewardAggregator;
use crate::units::UnitConverter;
use serde::{Deserialize, Serialize};
use stakeview_core::snapshot::{ProtocolReads, UserReads};
use stakeview_core::types::{AprRate, RewardLedger, StakePosition, TokenAmount};
use tracing::warn;

/// Protocol-wide statistics, raw and formatted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolStatsView {
    /// Total staked across all users, base units
    pub total_staked: TokenAmount,
    pub total_staked_display: String,

    /// Raw contract reward rate, passed through uninterpreted
    pub current_reward_rate: u128,

    /// Current APR from the decay curve
    pub current_apr: AprRate,
    pub current_apr_display: String,

    /// Total pending rewards, base units
    pub total_rewards: TokenAmount,
    pub total_rewards_display: String,

    /// Pending plus claimed rewards, best-effort (see `RewardAggregator`)
    pub combined_rewards: f64,
    pub combined_rewards_display: String,
}

/// Build the protocol statistics view for one snapshot.
pub fn protocol_stats(reads: &ProtocolReads, claimed_rewards_total: f64) -> ProtocolStatsView {
    let total_staked = reads.total_staked.unwrap_or(0);
    let current_reward_rate = reads.current_reward_rate.unwrap_or(0);
    let total_rewards = reads.total_rewards.unwrap_or(0);

    let current_apr = AprCurve::current_apr(total_staked);
    let ledger = RewardLedger {
        pending_rewards: total_rewards,
        claimed_rewards_total,
    };
    let combined_rewards = RewardAggregator::aggregate_ledger(&ledger);

    ProtocolStatsView {
        total_staked,
        total_staked_display: UnitConverter::to_display(total_staked),
        current_reward_rate,
        current_apr,
        current_apr_display: UnitConverter::format_percentage(current_apr, 1),
        total_rewards,
        total_rewards_display: UnitConverter::to_display(total_rewards),
        combined_rewards,
        combined_rewards_display: RewardAggregator::format_total(combined_rewards),
    }
}

/// One user's staking data, raw and formatted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserStakingView {
    /// Staked amount, base units
    pub staked_amount: TokenAmount,
    pub staked_amount_display: String,

    /// Unix timestamp of the most recent stake, zero if never staked
    pub last_stake_timestamp: i64,

    /// Pending rewards, base units
    pub pending_rewards: TokenAmount,
    pub pending_rewards_display: String,

    /// Seconds until the lock expires
    pub time_until_unlock_secs: u64,
    pub time_until_unlock_display: String,

    /// Whether withdrawal is allowed right now
    pub can_withdraw: bool,

    /// Liquid token balance, base units
    pub balance: TokenAmount,
    pub balance_display: String,

    /// Allowance granted to the staking contract, base units
    pub allowance: TokenAmount,
    pub has_allowance: bool,

    /// Token symbol, falling back to a placeholder when unavailable
    pub token_symbol: String,
}

/// Build one user's staking view for one snapshot.
///
/// The contract's own `can_withdraw`/`time_until_unlock` take precedence
/// when supplied; the local evaluator fills the gap and cross-checks that
/// both paths agree on the unlock boundary rule.
pub fn user_staking(reads: &UserReads, now: i64) -> UserStakingView {
    let staked_amount = reads.staked_amount.unwrap_or(0);
    let last_stake_timestamp = reads.last_stake_timestamp.unwrap_or(0);
    let pending_rewards = reads.pending_rewards.unwrap_or(0);
    let balance = reads.balance.unwrap_or(0);
    let allowance = reads.allowance.unwrap_or(0);

    let position = StakePosition {
        staked_amount,
        last_stake_timestamp,
        lock_period_secs: DEFAULT_LOCK_PERIOD_SECS,
    };
    let local = EligibilityEvaluator::evaluate_position(&position, now);

    let can_withdraw = match reads.can_withdraw {
        Some(contract_says) => {
            if contract_says != local.can_withdraw {
                warn!(
                    contract = contract_says,
                    local = local.can_withdraw,
                    last_stake_timestamp,
                    "withdrawal eligibility disagrees with local evaluation"
                );
            }
            contract_says
        }
        None => local.can_withdraw,
    };
    let time_until_unlock_secs = reads
        .time_until_unlock
        .unwrap_or(local.time_until_unlock_secs);

    UserStakingView {
        staked_amount,
        staked_amount_display: UnitConverter::to_display(staked_amount),
        last_stake_timestamp,
        pending_rewards,
        pending_rewards_display: UnitConverter::to_display(pending_rewards),
        time_until_unlock_secs,
        time_until_unlock_display: DurationFormatter::format(
            i64::try_from(time_until_unlock_secs).unwrap_or(i64::MAX),
        ),
        can_withdraw,
        balance,
        balance_display: UnitConverter::to_display(balance),
        allowance,
        has_allowance: allowance > 0,
        token_symbol: reads
            .token_symbol
            .clone()
            .unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ONE_TOKEN;
    use crate::duration::READY_TO_WITHDRAW;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_missing_protocol_reads_default_to_zero() {
        let view = protocol_stats(&ProtocolReads::default(), 0.0);

        assert_eq!(view.total_staked, 0);
        assert_eq!(view.total_staked_display, "0");
        // Empty pool pays the initial rate, matching the zero fallback
        assert_eq!(view.current_apr_display, "250%");
        assert_eq!(view.combined_rewards_display, "0.000000");
    }

    #[test]
    fn test_protocol_stats_formatting() {
        let reads = ProtocolReads {
            total_staked: Some(1_000 * ONE_TOKEN),
            current_reward_rate: Some(7),
            total_rewards: Some(ONE_TOKEN / 2),
        };

        let view = protocol_stats(&reads, 2.0);

        assert_eq!(view.total_staked_display, "1000");
        assert_eq!(view.current_reward_rate, 7);
        assert_eq!(view.current_apr_display, "249.5%");
        assert_eq!(view.total_rewards_display, "0.5");
        assert_eq!(view.combined_rewards, 2.5);
        assert_eq!(view.combined_rewards_display, "2.500000");
    }

    #[test]
    fn test_empty_user_reads() {
        let view = user_staking(&UserReads::default(), NOW);

        assert_eq!(view.staked_amount_display, "0");
        assert!(!view.can_withdraw);
        // Never staked: the full lock period is reported
        assert_eq!(view.time_until_unlock_secs, 90);
        assert_eq!(view.time_until_unlock_display, "1m 30s");
        assert!(!view.has_allowance);
        assert_eq!(view.token_symbol, "TOKEN");
    }

    #[test]
    fn test_local_evaluation_fallback() {
        let reads = UserReads {
            staked_amount: Some(5 * ONE_TOKEN),
            last_stake_timestamp: Some(NOW - 90),
            pending_rewards: Some(ONE_TOKEN / 4),
            ..UserReads::default()
        };

        let view = user_staking(&reads, NOW);

        assert!(view.can_withdraw);
        assert_eq!(view.time_until_unlock_secs, 0);
        assert_eq!(view.time_until_unlock_display, READY_TO_WITHDRAW);
        assert_eq!(view.pending_rewards_display, "0.25");
    }

    #[test]
    fn test_contract_verdict_takes_precedence() {
        // Contract says locked even though the local rule says unlocked
        let reads = UserReads {
            last_stake_timestamp: Some(NOW - 90),
            can_withdraw: Some(false),
            time_until_unlock: Some(12),
            ..UserReads::default()
        };

        let view = user_staking(&reads, NOW);

        assert!(!view.can_withdraw);
        assert_eq!(view.time_until_unlock_secs, 12);
        assert_eq!(view.time_until_unlock_display, "12s");
    }

    #[test]
    fn test_symbol_and_allowance() {
        let reads = UserReads {
            balance: Some(3 * ONE_TOKEN / 2),
            allowance: Some(1),
            token_symbol: Some("STK".to_string()),
            ..UserReads::default()
        };

        let view = user_staking(&reads, NOW);

        assert_eq!(view.balance_display, "1.5");
        assert!(view.has_allowance);
        assert_eq!(view.token_symbol, "STK");
    }
}
