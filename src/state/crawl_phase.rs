//! Crawl phase state machine
//!
//! A discovery crawl moves strictly forward through its phases:
//! `Idle -> Homepage -> Sections -> Pagination -> Done`. `Done` may also be
//! reached directly from `Homepage` when the homepage cannot be fetched.

use crate::ScoutError;
use std::fmt;

/// The phase a crawl is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Crawl has not started
    Idle,

    /// Draining the frontier from the homepage under the phase budget
    Homepage,

    /// Probing content-section index pages found on the homepage
    Sections,

    /// Draining remaining pagination urls under the absolute ceiling
    Pagination,

    /// Crawl finished
    Done,
}

impl CrawlPhase {
    /// Returns true if `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Homepage)
                | (Self::Homepage, Self::Sections)
                | (Self::Homepage, Self::Done)
                | (Self::Sections, Self::Pagination)
                | (Self::Pagination, Self::Done)
        )
    }

    /// Returns the successor phase or an error for an illegal transition
    pub fn transition(self, next: CrawlPhase) -> Result<CrawlPhase, ScoutError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ScoutError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Returns true once the crawl has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Homepage => "homepage",
            Self::Sections => "sections",
            Self::Pagination => "pagination",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        let phase = CrawlPhase::Idle
            .transition(CrawlPhase::Homepage)
            .and_then(|p| p.transition(CrawlPhase::Sections))
            .and_then(|p| p.transition(CrawlPhase::Pagination))
            .and_then(|p| p.transition(CrawlPhase::Done))
            .unwrap();
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_homepage_can_finish_early() {
        assert!(CrawlPhase::Homepage.can_transition_to(CrawlPhase::Done));
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(!CrawlPhase::Sections.can_transition_to(CrawlPhase::Homepage));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Idle));
        assert!(!CrawlPhase::Idle.can_transition_to(CrawlPhase::Pagination));
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = CrawlPhase::Pagination
            .transition(CrawlPhase::Sections)
            .unwrap_err();
        assert!(matches!(
            err,
            ScoutError::InvalidTransition {
                from: CrawlPhase::Pagination,
                to: CrawlPhase::Sections
            }
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlPhase::Sections), "sections");
        assert_eq!(format!("{}", CrawlPhase::Done), "done");
    }
}
