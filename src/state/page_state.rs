/// Fetch outcome definitions for pages visited during discovery
use std::fmt;

/// Represents how a fetch of a single page ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStatus {
    /// Page was fetched and parsed into a DOM tree
    Ok,

    /// Transport failure or non-2xx status; no DOM tree
    FetchError,

    /// Body was received but could not be turned into a DOM tree
    ParseError,
}

impl FetchStatus {
    /// Returns true if the page has a usable DOM tree
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Converts the status to its report string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::FetchError => "fetch_error",
            Self::ParseError => "parse_error",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
