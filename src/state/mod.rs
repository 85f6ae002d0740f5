//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `FetchStatus`: how the fetch of a single page ended
//! - `CrawlPhase`: the phase state machine driving a discovery crawl

mod crawl_phase;
mod page_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use page_state::FetchStatus;
