//! Chain-access boundary
//!
//! Traits for the two external collaborators: the chain-access library
//! serving contract reads, and the transaction-history ledger serving the
//! claimed-rewards running sum. Implementations own transport, caching and
//! retries; this crate only consumes the read results, with every field an
//! explicit `Option` so a failed read stays visible.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stakeview_core::error::StakeviewError;
use stakeview_core::snapshot::{ProtocolReads, UserReads};
use stakeview_economics::constants::ONE_TOKEN;
use thiserror::Error;

/// Errors surfaced by a chain-access implementation
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// The underlying read could not be served
    #[error("Chain read failed: {0}")]
    ReadFailed(String),

    /// The address is unknown to the provider
    #[error("Unknown address: {0}")]
    UnknownAddress(String),
}

impl From<ProviderError> for StakeviewError {
    fn from(err: ProviderError) -> Self {
        StakeviewError::ProviderUnavailable(err.to_string())
    }
}

/// Read-only access to staking contract state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainStateProvider: Send + Sync {
    /// Protocol-wide reads for one poll
    async fn protocol_reads(&self) -> Result<ProtocolReads, ProviderError>;

    /// Per-user reads for one poll
    async fn user_reads(&self, address: &str) -> Result<UserReads, ProviderError>;
}

/// Read-only access to the external transaction-history ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardHistory: Send + Sync {
    /// Approximate running sum of rewards the user has already claimed
    async fn claimed_rewards_total(&self, address: &str) -> Result<f64, ProviderError>;
}

/// In-process provider that evolves plausible protocol state each poll.
///
/// Deterministic for a given seed; backs the CLI demo and the integration
/// tests. Leaves `time_until_unlock`/`can_withdraw` unset so the local
/// eligibility evaluator is exercised.
pub struct SimulatedProvider {
    state: Mutex<SimState>,
}

struct SimState {
    rng: StdRng,
    total_staked: u128,
    total_rewards: u128,
    user_staked: u128,
    user_pending: u128,
    user_balance: u128,
    last_stake_timestamp: i64,
    claimed_total: f64,
}

impl SimulatedProvider {
    /// Create a simulation seeded at `genesis` (Unix seconds).
    pub fn new(seed: u64, genesis: i64) -> Self {
        Self {
            state: Mutex::new(SimState {
                rng: StdRng::seed_from_u64(seed),
                total_staked: 120_000 * ONE_TOKEN,
                total_rewards: 40 * ONE_TOKEN,
                user_staked: 250 * ONE_TOKEN,
                user_pending: ONE_TOKEN / 10,
                user_balance: 1_000 * ONE_TOKEN,
                last_stake_timestamp: genesis,
                claimed_total: 12.5,
            }),
        }
    }
}

#[async_trait]
impl ChainStateProvider for SimulatedProvider {
    async fn protocol_reads(&self) -> Result<ProtocolReads, ProviderError> {
        let mut state = self.state.lock();

        let inflow = state.rng.gen_range(0..=500u128) * ONE_TOKEN;
        state.total_staked = state.total_staked.saturating_add(inflow);
        state.total_rewards = state.total_rewards.saturating_add(ONE_TOKEN / 50);

        Ok(ProtocolReads {
            total_staked: Some(state.total_staked),
            current_reward_rate: Some(1_000_000_000),
            total_rewards: Some(state.total_rewards),
        })
    }

    async fn user_reads(&self, _address: &str) -> Result<UserReads, ProviderError> {
        let mut state = self.state.lock();

        state.user_pending = state.user_pending.saturating_add(ONE_TOKEN / 200);

        Ok(UserReads {
            staked_amount: Some(state.user_staked),
            last_stake_timestamp: Some(state.last_stake_timestamp),
            pending_rewards: Some(state.user_pending),
            time_until_unlock: None,
            can_withdraw: None,
            balance: Some(state.user_balance),
            allowance: Some(u128::MAX / 2),
            token_symbol: Some("STK".to_string()),
        })
    }
}

#[async_trait]
impl RewardHistory for SimulatedProvider {
    async fn claimed_rewards_total(&self, _address: &str) -> Result<f64, ProviderError> {
        let mut state = self.state.lock();
        state.claimed_total += 0.000_5;
        Ok(state.claimed_total)
    }
}
