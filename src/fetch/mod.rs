//! Cache-first request dispatch
//!
//! Every outbound HTTP request passes through [`Dispatcher::fetch`], which
//! consults the [`CacheStore`](crate::cache::CacheStore) before touching the
//! network and records each fresh response body afterwards.

mod dispatcher;
mod identity;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::Dispatcher;
pub use identity::request_identity;
pub use transport::{HttpTransport, Transport};

use thiserror::Error;

use crate::cache::CacheError;

/// Errors that can occur when dispatching a request
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response arrived but could not be persisted
    #[error(transparent)]
    Cache(#[from] CacheError),
}
