use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The independently stored record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Challenge,
    Video,
}

impl EntityKind {
    /// Capitalized name used in envelope source tags ("Create User").
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Challenge => "Challenge",
            Self::Video => "Video",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Challenge => "challenge",
            Self::Video => "video",
        };
        f.write_str(name)
    }
}

/// Per-request context threaded from the HTTP boundary down to the
/// repositories. Only carries the request id used to correlate log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}
