//! Cache module for storing raw HTTP response bodies on disk
//!
//! This module provides a cache store that keeps every response body keyed by
//! its request identity in a single JSON file. The file is read once at startup
//! and rewritten in full after every insertion.

mod store;

pub use store::{default_cache_path, CacheError, CacheStore};
