//! Readiness reporting for pollers

use crate::common::SocketEvents;
use crate::respondent::state::SurveyState;

/// Mask raw engine readiness by survey state
///
/// A respondent is only writable while it owes a reply, whatever the engine
/// says; a poller woken while idle would just hit an FSM violation.
pub fn mask_events(state: &SurveyState, engine_events: SocketEvents) -> SocketEvents {
    if state.is_awaiting_reply() {
        engine_events
    } else {
        engine_events - SocketEvents::OUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_never_writable() {
        let events = mask_events(&SurveyState::Idle, SocketEvents::IN | SocketEvents::OUT);
        assert_eq!(events, SocketEvents::IN);
    }

    #[test]
    fn test_awaiting_passes_through() {
        let state = SurveyState::AwaitingReply { survey_id: 1 };
        assert_eq!(mask_events(&state, SocketEvents::OUT), SocketEvents::OUT);
        assert_eq!(mask_events(&state, SocketEvents::empty()), SocketEvents::empty());
    }
}
