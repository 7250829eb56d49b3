//! Survey correlation state machine

use tracing::{debug, trace};

use crate::common::{TransportError, TransportResult};
use crate::envelope::SurveyId;

/// Where a respondent stands with respect to the latest survey
///
/// The survey id only exists while a reply is owed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurveyState {
    #[default]
    Idle,
    AwaitingReply { survey_id: SurveyId },
}

impl SurveyState {
    /// Record a freshly received survey, from any state
    pub fn on_survey_received(&mut self, survey_id: SurveyId) {
        if let SurveyState::AwaitingReply { survey_id: stale } = *self {
            trace!(stale, survey_id, "unanswered survey superseded");
        }
        *self = SurveyState::AwaitingReply { survey_id };
        debug!(survey_id, "survey received");
    }

    /// The survey a reply would answer
    ///
    /// # Errors
    ///
    /// `FsmViolation` while idle.
    pub fn reply_target(&self) -> TransportResult<SurveyId> {
        match *self {
            SurveyState::AwaitingReply { survey_id } => Ok(survey_id),
            SurveyState::Idle => Err(TransportError::FsmViolation),
        }
    }

    /// The reply was accepted for delivery
    pub fn complete(&mut self) {
        *self = SurveyState::Idle;
    }

    pub fn survey_id(&self) -> Option<SurveyId> {
        self.reply_target().ok()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self, SurveyState::AwaitingReply { .. })
    }
}
