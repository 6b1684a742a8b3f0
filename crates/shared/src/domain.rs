use serde::{Deserialize, Serialize};

use crate::error::InvalidUserId;

/// Free-text staff identifier (e.g. `G01234567`).
///
/// The upstream directory treats ids as opaque strings, so no format is
/// enforced beyond non-emptiness after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Trims surrounding whitespace from raw form input. Empty or
    /// whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidUserId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
