//! Message and pipe identifiers

use serde::{Deserialize, Serialize};

/// Identifies one peer connection attached to a distribution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PipeId(pub u64);

impl std::fmt::Display for PipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A message split into protocol header and opaque application body
///
/// Messages handed to and returned from a respondent socket always carry an
/// empty header. The header only holds the survey envelope while the message
/// travels between the socket and its engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub(crate) header: Vec<u8>,
    pub(crate) body: Vec<u8>,
}

impl Message {
    /// Create a message with an empty header
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            header: Vec::new(),
            body: body.into(),
        }
    }

    /// Create a message carrying a protocol header
    ///
    /// For engines and peers framing traffic. A message built this way must
    /// not be handed to a respondent's `send`, which expects an empty header.
    pub fn with_header(header: impl Into<Vec<u8>>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Total size in bytes, header included
    pub fn size(&self) -> usize {
        self.header.len() + self.body.len()
    }
}

impl From<Vec<u8>> for Message {
    fn from(body: Vec<u8>) -> Self {
        Self::new(body)
    }
}
