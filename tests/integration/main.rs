//! Integration tests for Article-Scout
//!
//! Every test runs against a wiremock server standing in for the target
//! site (and, where needed, the advisor API).

mod common;
mod crawl_tests;
mod discovery_tests;
mod refine_tests;
