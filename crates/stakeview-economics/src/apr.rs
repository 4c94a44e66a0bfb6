//! # APR Curve
//!
//! Computes the current annual percentage rate from the total staked
//! amount via a monotonic decay: the rate drops half a percentage point for
//! every 1,000 whole tokens staked, from 250% down to a 10% floor.
//!
//! The curve runs on integer division of the base-unit amount, so results
//! are deterministic and independent of floating-point rounding no matter
//! how large the pool grows.

use crate::constants::{APR_STEP_BPS, APR_TRANCHE_UNITS, INITIAL_APR_BPS, MIN_APR_BPS};
use stakeview_core::types::{AprRate, TokenAmount};

/// Total-staked → current APR curve
pub struct AprCurve;

impl AprCurve {
    /// `rate = max(MIN_APR, INITIAL_APR - APR_STEP * floor(total_staked / TRANCHE))`
    ///
    /// Total for every input: zero yields the initial 250%, and arbitrarily
    /// large pools saturate at the 10% floor instead of underflowing.
    pub fn current_apr(total_staked: TokenAmount) -> AprRate {
        let tranches = total_staked / APR_TRANCHE_UNITS;
        let reduction = tranches.saturating_mul(APR_STEP_BPS as u128);
        let bps = (INITIAL_APR_BPS as u128)
            .saturating_sub(reduction)
            .max(MIN_APR_BPS as u128);

        AprRate::from_bps(bps as u64)
    }
}
