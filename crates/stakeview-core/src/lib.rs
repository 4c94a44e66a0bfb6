//! # Stakeview Core
//!
//! Core data model for the Stakeview display layer of a token-staking
//! protocol.
//!
//! This crate provides the fundamental building blocks:
//! - `TokenAmount` / `AprRate` - base-unit amounts and fixed-point rates
//! - `StakePosition` / `RewardLedger` / `EligibilityResult` - protocol state
//! - `ChainSnapshot` - an immutable per-tick bundle of raw contract reads
//! - `SnapshotSequence` / `LatestWins` - ordering for overlapping polls
//!
//! ## Architecture
//!
//! Raw contract reads flow in as explicit `Option`s (a missing read stays
//! visible as `None` until it enters the calculation layer), get stamped
//! with a monotone sequence number, and are consumed as immutable
//! snapshots. Consumers always prefer the highest sequence number received.

pub mod error;
pub mod seq;
pub mod snapshot;
pub mod types;

pub use error::*;
pub use seq::*;
pub use snapshot::*;
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, StakeviewError};
    pub use crate::seq::{LatestWins, SnapshotSequence};
    pub use crate::snapshot::{ChainSnapshot, ProtocolReads, UserReads};
    pub use crate::types::*;
}
