//! # spsurvey-transports
//!
//! The respondent role of the survey messaging pattern.
//!
//! A surveyor broadcasts a survey to every connected respondent; each
//! respondent may answer it at most once. This crate holds the part of a
//! respondent socket that decides *whether* a reply may go out and *which*
//! survey it answers:
//!
//! - **Envelope codec** ([`envelope`]): the 4-byte big-endian survey id that
//!   prefixes every survey and reply on the wire.
//! - **Survey state machine** ([`respondent::SurveyState`]): tracks the survey
//!   currently owed a reply.
//! - **Readiness** ([`respondent::mask_events`]): a respondent only reports
//!   itself writable while a reply is owed.
//! - **Engine boundary** ([`traits::DistributionEngine`]): the non-blocking
//!   pipe layer underneath, with backpressure expressed as
//!   [`traits::SendOutcome::WouldBlock`].
//!
//! ## Feature Flags
//!
//! - `memory` (default): [`memory::MemoryEngine`], a bounded-queue engine for
//!   in-process peers
//!
//! ## Error model
//!
//! `FsmViolation`, `WouldBlock` and `InvalidHeaderLength` are returned to the
//! caller. A malformed header coming from the engine means the engine broke
//! its contract, and panics.

pub mod common;
pub mod envelope;
pub mod respondent;
pub mod traits;

#[cfg(feature = "memory")]
pub mod memory;

pub use common::{
    Message, PipeId, SocketEvents, SocketType, TransportError, TransportResult,
};
pub use envelope::{SurveyId, SURVEY_ID_LEN};
pub use respondent::{RespondentSocket, SurveyState};
pub use traits::{DistributionEngine, SendOutcome, SocketBase};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::common::*;
    pub use crate::envelope::{SurveyId, SURVEY_ID_LEN};
    pub use crate::respondent::{RespondentSocket, SurveyState};
    pub use crate::traits::*;

    #[cfg(feature = "memory")]
    pub use crate::memory::{MemoryEngine, MemoryPeer, MemoryPipe};
}
