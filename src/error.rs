//! Setup and lifecycle errors
//!
//! Per-frame problems (bad pointer, unstable collision solve) are recovered
//! inside the simulation and only logged; they never reach the host.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("simulation is already running")]
    AlreadyRunning,
    #[error("simulation has not been started")]
    NotStarted,
    #[error("simulation was destroyed and cannot be used again")]
    Destroyed,
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
