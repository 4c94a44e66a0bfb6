//! # Stakeview Service
//!
//! The surrounding system for the calculation core: an explicit scheduler
//! that periodically fetches raw contract state through a provider trait
//! and passes immutable snapshots into the pure calculation layer.
//!
//! Every tick is stamped with a monotone sequence number and published
//! latest-wins, so overlapping or out-of-order polls can never surface
//! stale figures. The core itself stays free of I/O; everything async
//! lives here.

pub mod config;
pub mod engine;
pub mod provider;

pub use config::{LoggingConfig, RefreshConfig, ServiceConfig};
pub use engine::{DashboardSnapshot, RefreshEngine, RefreshEvent, RefreshStats};
pub use provider::{ChainStateProvider, ProviderError, RewardHistory, SimulatedProvider};
