//! Refresh Engine
//!
//! Polls raw contract state on a fixed cadence and recomputes every derived
//! value from scratch as an immutable snapshot. Each tick is stamped with a
//! monotone sequence number before any read starts; publication goes
//! through a latest-wins holder, so a tick that completes late can never
//! overwrite fresher state.

use crate::config::RefreshConfig;
use crate::provider::{ChainStateProvider, RewardHistory};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use stakeview_core::error::{Result, StakeviewError};
use stakeview_core::seq::{LatestWins, SnapshotSequence};
use stakeview_core::snapshot::ChainSnapshot;
use stakeview_economics::view::{self, ProtocolStatsView, UserStakingView};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Derived output for one refresh cycle, consumed by the presentation layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Snapshot sequence number
    pub seq: u64,

    /// Wall-clock capture time, Unix seconds
    pub taken_at: i64,

    /// Protocol-wide statistics
    pub protocol: ProtocolStatsView,

    /// Watched user's staking data, absent when no address is configured
    pub user: Option<UserStakingView>,
}

/// Statistics for the refresh loop
#[derive(Clone, Debug, Default)]
pub struct RefreshStats {
    /// Completed refresh cycles
    pub refreshes_completed: u64,

    /// Failed refresh cycles
    pub refresh_errors: u64,

    /// Average refresh time (ms)
    pub avg_refresh_time_ms: f64,

    /// Last successful refresh timestamp
    pub last_refresh: Option<i64>,
}

/// Events emitted by the refresh engine
#[derive(Clone, Debug)]
pub enum RefreshEvent {
    /// A new snapshot was published
    SnapshotReady { seq: u64 },

    /// The tick was skipped; the previous snapshot stays published
    RefreshFailed { seq: u64, error: String },
}

/// The refresh engine - polls, derives, publishes.
pub struct RefreshEngine<P, H> {
    config: RefreshConfig,
    provider: Arc<P>,
    history: Arc<H>,
    stats: Arc<RwLock<RefreshStats>>,
    event_tx: broadcast::Sender<RefreshEvent>,
    seq: SnapshotSequence,
    latest: LatestWins<DashboardSnapshot>,
}

impl<P, H> RefreshEngine<P, H>
where
    P: ChainStateProvider,
    H: RewardHistory,
{
    /// Create a new engine around a provider and history collaborator.
    pub fn new(config: RefreshConfig, provider: Arc<P>, history: Arc<H>) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity);

        Self {
            config,
            provider,
            history,
            stats: Arc::new(RwLock::new(RefreshStats::default())),
            event_tx,
            seq: SnapshotSequence::new(),
            latest: LatestWins::new(),
        }
    }

    /// Get event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.event_tx.subscribe()
    }

    /// Get current stats
    pub fn stats(&self) -> RefreshStats {
        self.stats.read().clone()
    }

    /// Latest published snapshot
    pub fn latest(&self) -> Option<DashboardSnapshot> {
        self.latest.latest().map(|(_, snapshot)| snapshot)
    }

    /// Run the refresh loop until shutdown.
    pub async fn run(&self, mut shutdown_rx: mpsc::Receiver<()>) {
        info!(
            "Starting refresh loop (interval: {}s, address: {:?})",
            self.config.interval_secs, self.config.watch_address
        );

        let interval = Duration::from_secs(self.config.interval_secs);
        // Fire the first tick immediately when the platform allows it
        let mut last_tick = Instant::now()
            .checked_sub(interval)
            .unwrap_or_else(Instant::now);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Refresh engine shutting down");
                    break;
                }
                _ = tokio::time::sleep(interval.saturating_sub(last_tick.elapsed())) => {
                    let started = Instant::now();
                    let seq = self.seq.issue();

                    match self.refresh_once(seq).await {
                        Ok(snapshot) => {
                            let elapsed = started.elapsed();

                            if self.latest.offer(seq, snapshot) {
                                info!(
                                    "Snapshot #{} published ({:.2}ms)",
                                    seq,
                                    elapsed.as_secs_f64() * 1000.0
                                );
                            } else {
                                let stale = StakeviewError::StaleSnapshot {
                                    offered: seq,
                                    published: self.latest.published_seq(),
                                };
                                debug!("{}", stale);
                            }

                            self.update_stats(elapsed);
                            let _ = self.event_tx.send(RefreshEvent::SnapshotReady { seq });
                        }
                        Err(e) => {
                            if e.is_recoverable() {
                                warn!("Refresh #{} failed: {}", seq, e);
                            } else {
                                error!("Refresh #{} failed: {}", seq, e);
                            }
                            self.stats.write().refresh_errors += 1;

                            let _ = self.event_tx.send(RefreshEvent::RefreshFailed {
                                seq,
                                error: e.to_string(),
                            });
                        }
                    }

                    last_tick = Instant::now();
                }
            }
        }
    }

    /// Poll every read once and derive a full dashboard snapshot.
    pub async fn refresh_once(&self, seq: u64) -> Result<DashboardSnapshot> {
        let taken_at = chrono::Utc::now().timestamp();

        let protocol = self.provider.protocol_reads().await?;
        let user = match self.config.watch_address.as_deref() {
            Some(address) => Some(self.provider.user_reads(address).await?),
            None => None,
        };

        // The history ledger is best-effort: a failed read degrades the
        // claimed total to zero instead of failing the render cycle.
        let claimed_rewards_total = match self.config.watch_address.as_deref() {
            Some(address) => match self.history.claimed_rewards_total(address).await {
                Ok(total) => total,
                Err(e) => {
                    debug!("Claimed-rewards history unavailable: {}", e);
                    0.0
                }
            },
            None => 0.0,
        };

        let snapshot = ChainSnapshot {
            seq,
            taken_at,
            protocol,
            user,
            claimed_rewards_total,
        };

        Ok(Self::derive(&snapshot))
    }

    /// Pure derivation from one immutable snapshot.
    pub fn derive(snapshot: &ChainSnapshot) -> DashboardSnapshot {
        DashboardSnapshot {
            seq: snapshot.seq,
            taken_at: snapshot.taken_at,
            protocol: view::protocol_stats(&snapshot.protocol, snapshot.claimed_rewards_total),
            user: snapshot
                .user
                .as_ref()
                .map(|reads| view::user_staking(reads, snapshot.taken_at)),
        }
    }

    /// Update refresh statistics
    fn update_stats(&self, elapsed: Duration) {
        let mut stats = self.stats.write();
        stats.refreshes_completed += 1;
        stats.last_refresh = Some(chrono::Utc::now().timestamp());

        let time_ms = elapsed.as_secs_f64() * 1000.0;

        // Exponential moving average for refresh time
        if stats.avg_refresh_time_ms == 0.0 {
            stats.avg_refresh_time_ms = time_ms;
        } else {
            stats.avg_refresh_time_ms = stats.avg_refresh_time_ms * 0.9 + time_ms * 0.1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockChainStateProvider, MockRewardHistory, ProviderError};
    use stakeview_core::snapshot::{ProtocolReads, UserReads};
    use stakeview_economics::constants::ONE_TOKEN;

    fn watched_config() -> RefreshConfig {
        RefreshConfig {
            watch_address: Some("0xabc".to_string()),
            ..RefreshConfig::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_once_builds_dashboard() {
        let mut provider = MockChainStateProvider::new();
        provider.expect_protocol_reads().returning(|| {
            Ok(ProtocolReads {
                total_staked: Some(1_000 * ONE_TOKEN),
                current_reward_rate: Some(1),
                total_rewards: Some(0),
            })
        });
        provider
            .expect_user_reads()
            .returning(|_| Ok(UserReads::default()));

        let mut history = MockRewardHistory::new();
        history
            .expect_claimed_rewards_total()
            .returning(|_| Ok(5.0));

        let engine = RefreshEngine::new(watched_config(), Arc::new(provider), Arc::new(history));
        let dashboard = engine.refresh_once(1).await.unwrap();

        assert_eq!(dashboard.seq, 1);
        assert_eq!(dashboard.protocol.current_apr_display, "249.5%");
        assert_eq!(dashboard.protocol.combined_rewards, 5.0);
        assert!(dashboard.user.is_some());
    }

    #[tokio::test]
    async fn test_history_failure_degrades_to_zero() {
        let mut provider = MockChainStateProvider::new();
        provider
            .expect_protocol_reads()
            .returning(|| Ok(ProtocolReads::default()));
        provider
            .expect_user_reads()
            .returning(|_| Ok(UserReads::default()));

        let mut history = MockRewardHistory::new();
        history
            .expect_claimed_rewards_total()
            .returning(|_| Err(ProviderError::ReadFailed("event log offline".into())));

        let engine = RefreshEngine::new(watched_config(), Arc::new(provider), Arc::new(history));
        let dashboard = engine.refresh_once(1).await.unwrap();

        assert_eq!(dashboard.protocol.combined_rewards, 0.0);
    }

    #[tokio::test]
    async fn test_provider_failure_fails_the_tick() {
        let mut provider = MockChainStateProvider::new();
        provider
            .expect_protocol_reads()
            .returning(|| Err(ProviderError::ReadFailed("rpc timeout".into())));

        let history = MockRewardHistory::new();
        let engine = RefreshEngine::new(watched_config(), Arc::new(provider), Arc::new(history));

        assert!(engine.refresh_once(1).await.is_err());
        assert!(engine.latest().is_none());
    }

    #[test]
    fn test_derive_without_user() {
        let snapshot = ChainSnapshot {
            seq: 9,
            taken_at: 1_700_000_000,
            protocol: ProtocolReads::default(),
            user: None,
            claimed_rewards_total: 1.25,
        };

        let dashboard =
            RefreshEngine::<MockChainStateProvider, MockRewardHistory>::derive(&snapshot);

        assert_eq!(dashboard.seq, 9);
        assert!(dashboard.user.is_none());
        assert_eq!(dashboard.protocol.combined_rewards, 1.25);
        assert_eq!(dashboard.protocol.current_apr_display, "250%");
    }
}
