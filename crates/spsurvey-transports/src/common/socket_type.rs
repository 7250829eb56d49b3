//! Socket type identifiers within the survey protocol family

use serde::{Deserialize, Serialize};

/// Protocol family number of the survey pattern
pub const PROTO_SURVEY: u16 = 6;

/// Socket roles of the survey pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    Surveyor,
    Respondent,
}

impl SocketType {
    /// Numeric protocol id exchanged with peers during connection setup
    pub fn protocol(self) -> u16 {
        match self {
            Self::Surveyor => PROTO_SURVEY * 16 + 2,
            Self::Respondent => PROTO_SURVEY * 16 + 3,
        }
    }

    /// The only socket type this one may talk to
    pub fn peer(self) -> SocketType {
        match self {
            Self::Surveyor => Self::Respondent,
            Self::Respondent => Self::Surveyor,
        }
    }

    pub fn is_valid_peer(self, protocol: u16) -> bool {
        self.peer().protocol() == protocol
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Surveyor => "surveyor",
            Self::Respondent => "respondent",
        }
    }
}

impl std::fmt::Display for SocketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
