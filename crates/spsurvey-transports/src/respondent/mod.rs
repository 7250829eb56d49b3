// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Respondent socket
//!
//! A respondent receives surveys broadcast by surveyors and sends back at
//! most one reply per survey. Only the most recently received survey can be
//! answered; receiving a newer survey silently abandons an unanswered one.
//!
//! ## Example
//!
//! ```
//! use spsurvey_transports::memory::MemoryEngine;
//! use spsurvey_transports::prelude::*;
//!
//! # fn main() -> Result<(), TransportError> {
//! let engine = MemoryEngine::new();
//! let (pipe, surveyor) = engine.open_pipe(PipeId(1));
//! let mut socket = RespondentSocket::new(engine);
//! socket.add_pipe(pipe)?;
//!
//! surveyor.send_survey(1, b"PING".to_vec())?;
//! let survey = socket.recv()?;
//! assert_eq!(survey.body(), b"PING");
//!
//! socket.send(Message::new(b"PONG".to_vec()))?;
//! let reply = surveyor.recv_reply().expect("reply delivered");
//! assert_eq!(reply.header(), &[0, 0, 0, 1]);
//! # Ok(())
//! # }
//! ```

pub mod readiness;
pub mod socket;
pub mod state;

pub use readiness::mask_events;
pub use socket::RespondentSocket;
pub use state::SurveyState;
