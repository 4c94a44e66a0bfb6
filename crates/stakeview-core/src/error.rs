//! Error types for Stakeview operations

use thiserror::Error;

/// Result type alias for Stakeview operations
pub type Result<T> = std::result::Result<T, StakeviewError>;

/// Errors that can occur in the Stakeview display layer
#[derive(Error, Debug, Clone)]
pub enum StakeviewError {
    /// Chain-access collaborator could not serve a read
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// An older snapshot was offered after a newer one was published
    #[error("Snapshot {offered} is older than published snapshot {published}")]
    StaleSnapshot { offered: u64, published: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StakeviewError {
    /// Check if the error clears on a later refresh cycle
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::StaleSnapshot { .. }
        )
    }
}
