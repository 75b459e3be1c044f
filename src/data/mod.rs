//! Core data models for NPS Explorer
//!
//! This module contains the types produced by scraping nps.gov and querying
//! the MapQuest places API, plus the errors those consumers can raise.

pub mod places;
pub mod sites;

pub use places::PlacesClient;
pub use sites::SiteDirectory;

use std::collections::BTreeMap;
use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can occur while scraping pages or decoding API responses
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The underlying request failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page does not have the expected structure
    #[error("Unexpected page structure: missing {0}")]
    Markup(String),

    /// The API response was not the expected JSON
    #[error("Failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A link on the page could not be resolved to a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ScrapeError {
    /// Whether the session should stop rather than report and continue
    ///
    /// Only cache persistence failures are fatal: once a write is lost the
    /// file no longer mirrors what was fetched.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScrapeError::Fetch(FetchError::Cache(_)))
    }
}

/// A national park site parsed from its nps.gov detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    category: String,
    name: String,
    address: String,
    zipcode: String,
    phone: Option<String>,
}

impl Site {
    /// Creates a site record
    ///
    /// # Arguments
    /// * `category` - Designation such as "National Park" (may be blank)
    /// * `name` - Site name, e.g. "Isle Royale"
    /// * `address` - City and state, e.g. "Houghton, MI"
    /// * `zipcode` - Postal code, e.g. "49931" or "82190-0168"
    /// * `phone` - Contact phone, if listed
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        zipcode: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            address: address.into(),
            zipcode: zipcode.into(),
            phone,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// One-line summary used in site listings
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.zipcode
        )
    }
}

/// Maps lower-cased state names to their nps.gov listing pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateIndex {
    urls: BTreeMap<String, String>,
}

impl StateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state, normalizing its name
    pub fn insert(&mut self, state: &str, url: impl Into<String>) {
        self.urls.insert(normalize_state(state), url.into());
    }

    /// Looks up a state's listing URL, ignoring case and surrounding whitespace
    pub fn lookup(&self, state: &str) -> Option<&str> {
        self.urls.get(&normalize_state(state)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl<S: AsRef<str>, U: Into<String>> FromIterator<(S, U)> for StateIndex {
    fn from_iter<I: IntoIterator<Item = (S, U)>>(iter: I) -> Self {
        let mut index = StateIndex::new();
        for (state, url) in iter {
            index.insert(state.as_ref(), url);
        }
        index
    }
}

fn normalize_state(state: &str) -> String {
    state.trim().to_lowercase()
}

/// A point of interest returned by the places API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
}

impl Place {
    /// Formats the place as a list entry, substituting placeholders for blank fields
    pub fn render(&self) -> String {
        format!(
            "- {} ({}): {}, {}",
            self.name,
            or_placeholder(&self.category, "no category"),
            or_placeholder(&self.address, "no address"),
            or_placeholder(&self.city, "no city"),
        )
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
