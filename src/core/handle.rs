use std::fmt;
use std::str::FromStr;

use crate::core::error::DetectError;

/// A validated X/Twitter handle: ASCII letters, digits, underscore, 1-15 chars.
///
/// Everything past this boundary may assume the grammar holds; the providers
/// and the resolver do not re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    /// Parses user input into a handle. A leading `@` and surrounding
    /// whitespace are trimmed before the grammar check.
    pub fn parse(raw: &str) -> Result<Self, DetectError> {
        let candidate = raw.trim().trim_start_matches('@');
        if candidate.is_empty()
            || candidate.len() > 15
            || !candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DetectError::InvalidHandle(raw.to_string()));
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Handle {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::parse(s)
    }
}
