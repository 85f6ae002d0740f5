//! Run-local crawl state
//!
//! This module handles:
//! - FIFO frontier management for urls awaiting fetch
//! - The visited set (a url is fetched at most once)
//! - Page budget accounting against the absolute ceiling

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Frontier, visited set and page counter for one discovery run
///
/// Invariants:
/// - `visited` only grows
/// - the frontier never holds a visited url, and never holds a url twice
/// - `pages_crawled <= budget`
#[derive(Debug)]
pub struct CrawlState {
    frontier: VecDeque<Url>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    pages_crawled: usize,
    budget: usize,
}

impl CrawlState {
    /// Creates state seeded with a single url
    ///
    /// # Arguments
    ///
    /// * `seed` - The first url to crawl (the homepage)
    /// * `budget` - Absolute ceiling on pages fetched in this run
    pub fn new(seed: Url, budget: usize) -> Self {
        let mut state = Self {
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            pages_crawled: 0,
            budget,
        };
        state.enqueue(seed);
        state
    }

    /// Appends a url to the back of the frontier
    ///
    /// Returns false (and does nothing) if the url was already visited or is
    /// already waiting in the frontier.
    pub fn enqueue(&mut self, url: Url) -> bool {
        let key = url.as_str();
        if self.visited.contains(key) || self.queued.contains(key) {
            return false;
        }
        self.queued.insert(key.to_string());
        self.frontier.push_back(url);
        true
    }

    /// Pops the next url in FIFO order
    pub fn next_url(&mut self) -> Option<Url> {
        let url = self.frontier.pop_front()?;
        self.queued.remove(url.as_str());
        Some(url)
    }

    /// Returns true if the url has already been fetched (or attempted)
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Returns true while fewer than `limit` pages have been fetched
    ///
    /// `limit` is capped at the absolute budget.
    pub fn has_capacity(&self, limit: usize) -> bool {
        self.pages_crawled < limit.min(self.budget)
    }

    /// Claims a url for fetching
    ///
    /// Returns false if the url was already visited or the phase limit is
    /// exhausted. On success the url is marked visited, counted against the
    /// budget, and dropped from the frontier if it was waiting there.
    pub fn claim(&mut self, url: &Url, limit: usize) -> bool {
        if self.is_visited(url) || !self.has_capacity(limit) {
            return false;
        }

        let key = url.as_str();
        if self.queued.remove(key) {
            self.frontier.retain(|queued| queued.as_str() != key);
        }
        self.visited.insert(key.to_string());
        self.pages_crawled += 1;
        true
    }

    pub fn pages_crawled(&self) -> usize {
        self.pages_crawled
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_frontier_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
