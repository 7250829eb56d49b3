//! Error types for survey sockets

use crate::common::PipeId;
use spsurvey_config::ConfigError;

/// Result type alias for socket operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced to the caller of a socket
///
/// Engine contract breaches are not represented here: they panic.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Operation not permitted in the current survey state
    #[error("Operation cannot be performed in this state: no survey awaiting a reply")]
    FsmViolation,

    /// Nothing available right now; try again later
    #[error("Resource temporarily unavailable")]
    WouldBlock,

    /// Only empty application headers may be set on this socket
    #[error("Invalid header length: {len} bytes (application headers must be empty)")]
    InvalidHeaderLength { len: usize },

    /// A pipe with this id is already attached to the engine
    #[error("Pipe {0} is already registered")]
    DuplicatePipe(PipeId),

    /// The other end of the pipe has gone away
    #[error("Pipe {0} is closed")]
    PipeClosed(PipeId),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TransportError {
    /// True for the non-fatal "try later" signal
    pub fn is_would_block(&self) -> bool {
        matches!(self, Self::WouldBlock)
    }
}
