//! # Stakeview Economics - Staking Yield & Display Calculations
//!
//! Deterministic, pure functions that convert raw protocol state into
//! derived economic values and their display representations.
//!
//! ## Components
//!
//! - **UnitConverter**: base-unit integers ↔ human decimal strings
//! - **AprCurve**: current annual rate from total staked
//! - **DurationFormatter**: seconds → compact human duration
//! - **EligibilityEvaluator**: withdrawal eligibility from timestamps
//! - **RewardAggregator**: pending + claimed rewards into one figure
//!
//! All components are side-effect free and safe to call concurrently; they
//! are composed per refresh cycle by the view builders in [`view`].
//!
//! ## APR Curve
//!
//! | Total staked     | Current APR |
//! |------------------|-------------|
//! | 0                | 250%        |
//! | 1,000 tokens     | 249.5%      |
//! | 100,000 tokens   | 200%        |
//! | 480,000+ tokens  | 10% (floor) |

pub mod apr;
pub mod duration;
pub mod eligibility;
pub mod rewards;
pub mod units;
pub mod view;

// Re-exports
pub use apr::AprCurve;
pub use duration::{DurationFormatter, READY_TO_WITHDRAW};
pub use eligibility::EligibilityEvaluator;
pub use rewards::RewardAggregator;
pub use units::{ConversionError, UnitConverter};
pub use view::{protocol_stats, user_staking, ProtocolStatsView, UserStakingView};

/// Protocol constants
pub mod constants {
    /// Token symbol fallback when the token contract read is unavailable
    pub const DEFAULT_SYMBOL: &str = "TOKEN";

    /// Decimal places (same as ETH)
    pub const DECIMALS: u32 = 18;

    /// One whole token in base units (like wei for ETH)
    pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000; // 10^18

    /// APR with an empty pool: 250%
    pub const INITIAL_APR_BPS: u64 = 25_000;

    /// APR floor: 10%
    pub const MIN_APR_BPS: u64 = 1_000;

    /// APR reduction per tranche: 0.5 percentage points
    pub const APR_STEP_BPS: u64 = 50;

    /// Whole tokens per APR reduction tranche
    pub const APR_TRANCHE_TOKENS: u128 = 1_000;

    /// Tranche size in base units
    pub const APR_TRANCHE_UNITS: u128 = APR_TRANCHE_TOKENS * ONE_TOKEN;

    /// Lock duration after each stake: 90 seconds
    pub const DEFAULT_LOCK_PERIOD_SECS: i64 = 90;

    /// Fraction digits for token amount display
    pub const TOKEN_DISPLAY_PRECISION: usize = 4;

    /// Fraction digits for the combined rewards figure
    pub const REWARD_DISPLAY_PRECISION: usize = 6;
}

pub use constants::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_token() {
        assert_eq!(ONE_TOKEN, 10u128.pow(DECIMALS));
    }

    #[test]
    fn test_apr_bounds() {
        assert!(MIN_APR_BPS < INITIAL_APR_BPS);
        assert_eq!(APR_TRANCHE_UNITS, 1_000 * ONE_TOKEN);
    }
}
