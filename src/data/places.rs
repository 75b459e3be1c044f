//! MapQuest radius search client
//!
//! Looks up points of interest around a site's postal code through the
//! MapQuest Search API v2 radius endpoint.

use serde::Deserialize;

use super::{Place, ScrapeError, Site};
use crate::fetch::{Dispatcher, Transport};

/// MapQuest radius search endpoint
const MAPQUEST_RADIUS_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

/// Search radius around the origin, in miles
const SEARCH_RADIUS_MILES: &str = "10";

/// Maximum number of places returned per query
const MAX_MATCHES: &str = "10";

/// Response from the radius endpoint
///
/// MapQuest omits `searchResults` entirely when nothing matches.
#[derive(Debug, Deserialize)]
struct RadiusResponse {
    #[serde(rename = "searchResults", default)]
    search_results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    fields: PlaceFields,
}

/// The subset of place fields we display
#[derive(Debug, Deserialize)]
struct PlaceFields {
    #[serde(default)]
    name: String,
    #[serde(rename = "group_sic_code_name_ext", default)]
    category: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
}

impl From<PlaceFields> for Place {
    fn from(fields: PlaceFields) -> Self {
        Place {
            name: fields.name,
            category: fields.category,
            address: fields.address,
            city: fields.city,
        }
    }
}

/// Client for nearby-place searches
#[derive(Debug, Clone)]
pub struct PlacesClient {
    /// MapQuest consumer key
    api_key: String,
    /// Endpoint URL (allows override for testing)
    base_url: String,
}

impl PlacesClient {
    /// Creates a client for the public MapQuest endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: MAPQUEST_RADIUS_URL.to_string(),
        }
    }

    /// Creates a client against a custom endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Query parameters for a radius search centered on `site`
    fn query_params<'a>(&'a self, site: &'a Site) -> [(&'a str, &'a str); 6] {
        [
            ("key", self.api_key.as_str()),
            ("origin", site.zipcode()),
            ("radius", SEARCH_RADIUS_MILES),
            ("maxMatches", MAX_MATCHES),
            ("ambiguities", "ignore"),
            ("outFormat", "json"),
        ]
    }

    /// Fetches places near a site
    ///
    /// # Returns
    /// * `Ok(Vec<Place>)` - Places in API order (possibly empty)
    /// * `Err(ScrapeError)` - If the request fails or the response is not valid JSON
    pub async fn nearby<T: Transport>(
        &self,
        dispatcher: &mut Dispatcher<T>,
        site: &Site,
    ) -> Result<Vec<Place>, ScrapeError> {
        let params = self.query_params(site);
        let body = dispatcher.fetch(&self.base_url, Some(&params)).await?;
        parse_places(&body)
    }
}

/// Decodes a radius search response body
pub fn parse_places(body: &str) -> Result<Vec<Place>, ScrapeError> {
    let response: RadiusResponse = serde_json::from_str(body)?;
    Ok(response
        .search_results
        .into_iter()
        .map(|result| result.fields.into())
        .collect())
}
