// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Survey envelope codec
//!
//! Wire layout of the protocol header:
//!
//! ```text
//! +--------+--------+--------+--------+------------------
//! |     survey id (u32, big-endian)   | body ...
//! +--------+--------+--------+--------+------------------
//! ```
//!
//! Header lengths are guaranteed by the engine and by the socket's header
//! accessors, so a mismatch here is a bug and panics.

use byteorder::{BigEndian, ByteOrder};

use crate::common::Message;

/// Survey correlation token
pub type SurveyId = u32;

/// Size of the survey header in bytes
pub const SURVEY_ID_LEN: usize = 4;

/// Encode a survey id as it appears on the wire
pub fn survey_header(survey_id: SurveyId) -> [u8; SURVEY_ID_LEN] {
    let mut header = [0u8; SURVEY_ID_LEN];
    BigEndian::write_u32(&mut header, survey_id);
    header
}

/// Read the survey id of a framed message without consuming it
///
/// Returns `None` when the header is not a survey header.
pub fn peek_survey_id(msg: &Message) -> Option<SurveyId> {
    (msg.header.len() == SURVEY_ID_LEN).then(|| BigEndian::read_u32(&msg.header))
}

/// Strip the survey header from an inbound message
///
/// # Panics
///
/// If the header is not exactly [`SURVEY_ID_LEN`] bytes.
pub fn decode(mut msg: Message) -> (SurveyId, Message) {
    assert_eq!(
        msg.header.len(),
        SURVEY_ID_LEN,
        "engine delivered a survey with a {}-byte header",
        msg.header.len()
    );
    let survey_id = BigEndian::read_u32(&msg.header);
    msg.header.clear();
    (survey_id, msg)
}

/// Tag an outbound reply with its survey header
///
/// # Panics
///
/// If the message already carries a header.
pub fn encode(survey_id: SurveyId, mut msg: Message) -> Message {
    assert!(
        msg.header.is_empty(),
        "reply reached the envelope codec with a {}-byte header",
        msg.header.len()
    );
    msg.header.extend_from_slice(&survey_header(survey_id));
    msg
}
