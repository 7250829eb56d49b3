//! Respondent socket: survey correlation over a distribution engine

use tracing::{debug, trace};

use crate::common::{Message, PipeId, SocketEvents, SocketType, TransportError, TransportResult};
use crate::envelope;
use crate::respondent::readiness::mask_events;
use crate::respondent::state::SurveyState;
use crate::traits::{DistributionEngine, SendOutcome, SocketBase};

/// Respondent end of the survey pattern
///
/// Owns its engine. Access is expected to be serialized by the owner; no
/// operation blocks or takes a lock.
#[derive(Debug)]
pub struct RespondentSocket<E> {
    engine: E,
    state: SurveyState,
}

impl<E: DistributionEngine> RespondentSocket<E> {
    /// Bind a new, idle respondent to `engine`
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: SurveyState::Idle,
        }
    }

    pub fn state(&self) -> SurveyState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Close the socket, handing the engine back
    pub fn into_engine(self) -> E {
        self.engine
    }
}

impl<E: DistributionEngine> SocketBase for RespondentSocket<E> {
    type Pipe = E::Pipe;

    fn socket_type(&self) -> SocketType {
        SocketType::Respondent
    }

    fn add_pipe(&mut self, pipe: Self::Pipe) -> TransportResult<()> {
        self.engine.add_pipe(pipe)
    }

    fn remove_pipe(&mut self, id: PipeId) -> Option<Self::Pipe> {
        self.engine.remove_pipe(id)
    }

    fn events(&self) -> SocketEvents {
        mask_events(&self.state, self.engine.events())
    }

    /// Reply to the current survey
    ///
    /// # Errors
    ///
    /// - `FsmViolation` if no survey is awaiting a reply; nothing changes.
    /// - `WouldBlock` if the engine pushed back. The reply is dropped and the
    ///   survey stays answerable.
    ///
    /// # Panics
    ///
    /// If `msg` carries a header, e.g. one built with `Message::with_header`.
    /// Application messages set headers only through `set_header`, which
    /// accepts nothing but an empty one.
    fn send(&mut self, msg: Message) -> TransportResult<()> {
        let survey_id = self.state.reply_target()?;
        let tagged = envelope::encode(survey_id, msg);

        match self.engine.send(tagged) {
            SendOutcome::Accepted => {
                self.state.complete();
                debug!(survey_id, "reply accepted");
                Ok(())
            }
            SendOutcome::WouldBlock(rejected) => {
                trace!(
                    survey_id,
                    bytes = rejected.size(),
                    "engine pushed back, reply dropped"
                );
                drop(rejected);
                Err(TransportError::WouldBlock)
            }
        }
    }

    /// Receive the next survey, making it the one to reply to
    ///
    /// # Errors
    ///
    /// `WouldBlock` if no survey is queued; the current survey, if any, is
    /// left untouched.
    fn recv(&mut self) -> TransportResult<Message> {
        let framed = self.engine.recv().ok_or(TransportError::WouldBlock)?;
        let (survey_id, payload) = envelope::decode(framed);
        self.state.on_survey_received(survey_id);
        Ok(payload)
    }

    fn set_header(&self, _msg: &mut Message, header: &[u8]) -> TransportResult<()> {
        if !header.is_empty() {
            return Err(TransportError::InvalidHeaderLength { len: header.len() });
        }
        Ok(())
    }

    fn get_header<'a>(&self, _msg: &'a Message) -> &'a [u8] {
        &[]
    }
}
