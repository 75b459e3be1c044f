//! In-memory transport for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{request_identity, FetchError, Transport};

/// Serves canned bodies keyed by request identity and counts every call
///
/// Unknown requests fail with a 404 status error. Clones share the same
/// call log.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    pages: HashMap<String, String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body for a parameterless GET of `url`
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Registers a body for `url` queried with `params`
    pub fn with_params_page(mut self, url: &str, params: &[(&str, &str)], body: &str) -> Self {
        self.pages
            .insert(request_identity(url, Some(params)), body.to_string());
        self
    }

    /// Number of requests issued so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let identity = request_identity(url, Some(params));
        self.calls.lock().unwrap().push(identity.clone());

        self.pages
            .get(&identity)
            .cloned()
            .ok_or(FetchError::Status {
                url: identity,
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

/// A miniature copy of nps.gov and the MapQuest radius API
pub mod fixtures {
    use super::FakeTransport;

    pub const API_KEY: &str = "test-key";

    pub const RADIUS_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

    pub const HOME_PAGE: &str = r#"
        <html><body>
            <ul class="dropdown-menu SearchBar-keywordSearch">
                <li><a href="/state/mi/index.htm">Michigan</a></li>
                <li><a href="/state/wy/index.htm">Wyoming</a></li>
            </ul>
        </body></html>
    "#;

    pub const MICHIGAN_PAGE: &str = r#"
        <html><body>
            <ul id="list_parks">
                <li class="clearfix">
                    <h2>National Park</h2>
                    <div class="col-md-9"><h3><a href="/isro/">Isle Royale</a></h3></div>
                </li>
                <li class="clearfix">
                    <h2>National Lakeshore</h2>
                    <div class="col-md-9"><h3><a href="/slbe/">Sleeping Bear Dunes</a></h3></div>
                </li>
            </ul>
        </body></html>
    "#;

    pub const WYOMING_PAGE: &str = r#"
        <html><body><ul id="list_parks"></ul></body></html>
    "#;

    pub const ISLE_ROYALE_PAGE: &str = r#"
        <html><body>
            <div class="Hero-titleContainer clearfix">
                <a href="/isro/" class="Hero-title">Isle Royale</a>
            </div>
            <div class="Hero-designationContainer">
                <span class="Hero-designation">National Park</span>
                <span class="Hero-location">Michigan</span>
            </div>
            <p itemprop="address">
                <span itemprop="addressLocality">Houghton</span>,
                <span itemprop="addressRegion">MI</span>
                <span itemprop="postalCode">49931</span>
            </p>
            <span itemprop="telephone">(906) 482-0984</span>
        </body></html>
    "#;

    pub const SLEEPING_BEAR_PAGE: &str = r#"
        <html><body>
            <div class="Hero-titleContainer clearfix">
                <a href="/slbe/" class="Hero-title">Sleeping Bear Dunes</a>
            </div>
            <div class="Hero-designationContainer">
                <span class="Hero-designation">National Lakeshore</span>
            </div>
            <span itemprop="addressLocality">Empire</span>
            <span itemprop="addressRegion">MI</span>
            <span itemprop="postalCode">49630</span>
        </body></html>
    "#;

    pub const ISLE_ROYALE_PLACES: &str = r#"{
        "searchResults": [
            {"fields": {
                "name": "Rock Harbor Lodge",
                "group_sic_code_name_ext": "Hotels & Motels",
                "address": "800 E Lakeshore Dr",
                "city": "Houghton"
            }},
            {"fields": {
                "name": "Ranger III Dock",
                "group_sic_code_name_ext": "",
                "address": "",
                "city": ""
            }}
        ]
    }"#;

    pub const SLEEPING_BEAR_PLACES: &str = r#"{"resultsCount": 0}"#;

    /// MapQuest query parameters for a postal code
    pub fn radius_params(zipcode: &str) -> [(&str, &str); 6] {
        [
            ("key", API_KEY),
            ("origin", zipcode),
            ("radius", "10"),
            ("maxMatches", "10"),
            ("ambiguities", "ignore"),
            ("outFormat", "json"),
        ]
    }

    /// Transport serving the home page, two states, two parks, and their places
    pub fn nps_site() -> FakeTransport {
        FakeTransport::new()
            .with_page("https://www.nps.gov/index.htm", HOME_PAGE)
            .with_page("https://www.nps.gov/state/mi/index.htm", MICHIGAN_PAGE)
            .with_page("https://www.nps.gov/state/wy/index.htm", WYOMING_PAGE)
            .with_page("https://www.nps.gov/isro/index.htm", ISLE_ROYALE_PAGE)
            .with_page("https://www.nps.gov/slbe/index.htm", SLEEPING_BEAR_PAGE)
            .with_params_page(RADIUS_URL, &radius_params("49931"), ISLE_ROYALE_PLACES)
            .with_params_page(RADIUS_URL, &radius_params("49630"), SLEEPING_BEAR_PLACES)
    }
}
