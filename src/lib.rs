//! NPS Explorer Library
//!
//! Exposes the cache, dispatcher, scrapers, and interactive session for use by
//! the binary and integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod fetch;
pub mod session;
