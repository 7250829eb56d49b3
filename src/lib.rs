//! # spsurvey - survey pattern respondent sockets
//!
//! A surveyor broadcasts a question to every connected respondent and
//! collects answers. This crate provides the respondent side: a socket that
//! receives surveys and returns at most one reply per survey, always tagged
//! with the id of the most recent survey.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! spsurvey = "0.1"
//! ```
//!
//! ```rust
//! use spsurvey::prelude::*;
//!
//! # fn main() -> Result<(), TransportError> {
//! let config = SurveyConfig::default();
//! let mut socket = spsurvey::open_respondent(&config)?;
//!
//! let (pipe, surveyor) = socket.engine().open_pipe(PipeId(1));
//! socket.add_pipe(pipe)?;
//!
//! surveyor.send_survey(7, b"status?".to_vec())?;
//! let survey = socket.recv()?;
//! socket.send(Message::new(b"ok".to_vec()))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - **`memory`** (default): in-process distribution engine
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: spsurvey-config                            │
//! │  (TOML config, env/CLI overrides, validation)           │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: spsurvey-observability                 │
//! │  (tracing subscriber, per-crate debug flags)            │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Sockets: spsurvey-transports                           │
//! │  (envelope codec, survey state machine, readiness)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use spsurvey_config as config;
pub use spsurvey_observability as observability;
pub use spsurvey_transports as transports;

#[cfg(feature = "memory")]
use spsurvey_config::SurveyConfig;
#[cfg(feature = "memory")]
use spsurvey_transports::{memory::MemoryEngine, RespondentSocket, TransportResult};

/// Open a respondent bound to a fresh in-memory engine sized by `config`
///
/// # Errors
///
/// Fails if `config` does not validate.
#[cfg(feature = "memory")]
pub fn open_respondent(config: &SurveyConfig) -> TransportResult<RespondentSocket<MemoryEngine>> {
    spsurvey_config::validate_config(config)?;
    let engine = MemoryEngine::with_config(config.engine.clone())?;
    tracing::debug!(
        send_hwm = config.engine.send_hwm,
        recv_hwm = config.engine.recv_hwm,
        "respondent opened"
    );
    Ok(RespondentSocket::new(engine))
}

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{EngineConfig, LogFormat, LoggingConfig, SurveyConfig};
    pub use crate::observability::{init_logging, CrateDebugFlags};
    pub use crate::transports::prelude::*;
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_open_respondent_uses_config() {
        let config = SurveyConfig {
            engine: EngineConfig::new(3, 5),
            ..Default::default()
        };
        let socket = open_respondent(&config).unwrap();
        assert_eq!(socket.engine().config(), &EngineConfig::new(3, 5));
        assert_eq!(socket.state(), SurveyState::Idle);
        assert_eq!(socket.socket_type(), SocketType::Respondent);
    }

    #[test]
    fn test_open_respondent_rejects_invalid_config() {
        let mut config = SurveyConfig::default();
        config.logging.level = "chatty".to_string();
        let err = open_respondent(&config).unwrap_err();
        assert!(matches!(err, TransportError::Config(_)));
    }
}
