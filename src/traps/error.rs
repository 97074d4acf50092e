//! Traps domain: errors raised when starting a transport run.
//!
//! Stale handles met mid-run are not errors here: the run drops the object and
//! carries on (see [`crate::traps::io::StaleHandle`]).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("invalid transport configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("no tracked objects to move")]
    NoTargets,

    #[error("a transport run is already in progress")]
    RunInProgress,
}

impl TransportError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
