//! The cache-first request funnel

use tracing::debug;

use super::{request_identity, FetchError, HttpTransport, Transport};
use crate::cache::CacheStore;

/// Routes every GET through the cache before the network
///
/// The dispatcher owns the cache store. `fetch` takes `&mut self`, so there is
/// exactly one caller at a time.
#[derive(Debug)]
pub struct Dispatcher<T = HttpTransport> {
    /// Cache of response bodies keyed by request identity
    cache: CacheStore,
    /// Network transport used on cache misses
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher with a custom transport
    pub fn with_transport(cache: CacheStore, transport: T) -> Self {
        Self { cache, transport }
    }

    /// Returns the body for a GET of `url`, from cache when possible
    ///
    /// # Arguments
    /// * `url` - The URL to fetch
    /// * `params` - Optional query parameters; `None` means a plain GET
    ///
    /// # Returns
    /// * `Ok(String)` - The cached body, or the freshly fetched and stored body
    /// * `Err(FetchError)` - If the network call fails or the new entry cannot be persisted
    ///
    /// # Behavior
    /// - On a cache hit no network call is made
    /// - On a miss exactly one GET is issued and its body is stored before returning
    /// - Failed requests are not cached
    pub async fn fetch(
        &mut self,
        url: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<String, FetchError> {
        let identity = request_identity(url, params);

        if let Some(body) = self.cache.get(&identity) {
            debug!(url, "Using cache");
            return Ok(body.to_string());
        }

        debug!(url, "Fetching");
        let body = self.transport.get(url, params.unwrap_or(&[])).await?;
        self.cache.put(identity, body.clone())?;

        Ok(body)
    }

    /// Read-only access to the underlying cache
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::FakeTransport;
    use tempfile::TempDir;

    const RADIUS_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

    fn create_test_dispatcher(transport: FakeTransport) -> (Dispatcher<FakeTransport>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheStore::load(temp_dir.path().join("cache.json"));
        (Dispatcher::with_transport(cache, transport), temp_dir)
    }

    #[tokio::test]
    async fn test_first_fetch_hits_network_once_then_cache() {
        let transport = FakeTransport::new().with_page("https://www.nps.gov/index.htm", "<html/>");
        let (mut dispatcher, temp_dir) = create_test_dispatcher(transport.clone());

        let first = dispatcher
            .fetch("https://www.nps.gov/index.htm", None)
            .await
            .unwrap();
        assert_eq!(first, "<html/>");
        assert_eq!(transport.call_count(), 1);

        // The entry must be on disk right after the miss
        let reloaded = CacheStore::load(temp_dir.path().join("cache.json"));
        assert_eq!(reloaded.get("https://www.nps.gov/index.htm"), Some("<html/>"));

        for _ in 0..3 {
            let again = dispatcher
                .fetch("https://www.nps.gov/index.htm", None)
                .await
                .unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(transport.call_count(), 1, "Repeat fetches must not touch the network");
    }

    #[tokio::test]
    async fn test_preloaded_cache_avoids_network() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        let mut seeded = CacheStore::load(&path);
        seeded.put("https://www.nps.gov/state/mi/index.htm", "cached").unwrap();

        let transport = FakeTransport::new();
        let mut dispatcher = Dispatcher::with_transport(CacheStore::load(&path), transport.clone());

        let body = dispatcher
            .fetch("https://www.nps.gov/state/mi/index.htm", None)
            .await
            .unwrap();

        assert_eq!(body, "cached");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_distinct_params_are_distinct_requests() {
        let transport = FakeTransport::new()
            .with_params_page(RADIUS_URL, &[("origin", "49931")], "isle royale places")
            .with_params_page(RADIUS_URL, &[("origin", "82190")], "yellowstone places");
        let (mut dispatcher, _temp_dir) = create_test_dispatcher(transport.clone());

        let a = dispatcher
            .fetch(RADIUS_URL, Some(&[("origin", "49931")]))
            .await
            .unwrap();
        let b = dispatcher
            .fetch(RADIUS_URL, Some(&[("origin", "82190")]))
            .await
            .unwrap();

        assert_eq!(a, "isle royale places");
        assert_eq!(b, "yellowstone places");
        assert_eq!(transport.call_count(), 2);
        assert_eq!(dispatcher.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_network_error_propagates_and_is_not_cached() {
        let transport = FakeTransport::new();
        let (mut dispatcher, _temp_dir) = create_test_dispatcher(transport.clone());

        let result = dispatcher.fetch("https://www.nps.gov/missing.htm", None).await;

        assert!(matches!(result, Err(FetchError::Status { .. })));
        assert!(dispatcher.cache().is_empty());

        let _ = dispatcher.fetch("https://www.nps.gov/missing.htm", None).await;
        assert_eq!(transport.call_count(), 2, "Failures must be retried on the next call");
    }
}
