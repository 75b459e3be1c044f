//! Request identity used as the cache key

use url::form_urlencoded;

/// Query parameters that carry credentials rather than describe the request
///
/// These are sent on the wire but never written into a cache key.
const CREDENTIAL_PARAMS: &[&str] = &["key"];

/// Computes the cache key for a GET of `url` with optional query parameters
///
/// A request without parameters (or with an empty set) is keyed by the bare
/// URL. Otherwise the parameters are sorted and form-encoded onto the URL, so
/// the same URL queried with different parameters gets a different key, and
/// parameter order does not matter.
///
/// Credential parameters (the MapQuest `key`) are left out, so the API key is
/// never stored in the cache file and rotating it keeps cached responses valid.
pub fn request_identity(url: &str, params: Option<&[(&str, &str)]>) -> String {
    let mut sorted: Vec<(&str, &str)> = params
        .unwrap_or(&[])
        .iter()
        .copied()
        .filter(|(name, _)| !CREDENTIAL_PARAMS.contains(name))
        .collect();
    if sorted.is_empty() {
        return url.to_string();
    }
    sorted.sort_unstable();

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish();

    let separator = if url.ends_with('?') || url.ends_with('&') {
        ""
    } else if url.contains('?') {
        "&"
    } else {
        "?"
    };

    format!("{url}{separator}{query}")
}
