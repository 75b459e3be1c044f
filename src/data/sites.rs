//! nps.gov site directory scraper
//!
//! Builds the state index from the nps.gov home page, lists the parks on a
//! state page, and parses each park's detail page into a [`Site`].

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{ScrapeError, Site, StateIndex};
use crate::fetch::{Dispatcher, Transport};

/// Base URL of the park-service website
pub const NPS_BASE_URL: &str = "https://www.nps.gov";

/// Parses a selector that is known to be valid
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

/// Trimmed text content of an element
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Direct `<li>` children of a list element
fn list_items<'a>(list: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
}

/// Text of the first element matching `css`, or a markup error naming `what`
fn required_text(root: ElementRef<'_>, css: &str, what: &str) -> Result<String, ScrapeError> {
    root.select(&selector(css))
        .next()
        .map(text_of)
        .ok_or_else(|| ScrapeError::Markup(what.to_string()))
}

/// Scrapes the nps.gov directory through a [`Dispatcher`]
#[derive(Debug, Clone)]
pub struct SiteDirectory {
    /// Site root used to resolve relative links
    base_url: Url,
}

impl SiteDirectory {
    /// Creates a directory rooted at nps.gov
    pub fn new() -> Self {
        Self {
            base_url: Url::parse(NPS_BASE_URL).expect("valid base URL"),
        }
    }

    /// Creates a directory rooted at a custom URL
    ///
    /// The home page is resolved relative to `base_url`, so a base with a path
    /// prefix should end in `/`.
    pub fn with_base_url(base_url: Url) -> Self {
        Self { base_url }
    }

    /// URL of the home page that carries the state dropdown
    pub fn home_url(&self) -> Result<Url, ScrapeError> {
        Ok(self.base_url.join("index.htm")?)
    }

    /// Builds the state name → listing URL index from the home page
    ///
    /// The home page response is cached like any other; the index itself is
    /// rebuilt on every call.
    pub async fn build_state_index<T: Transport>(
        &self,
        dispatcher: &mut Dispatcher<T>,
    ) -> Result<StateIndex, ScrapeError> {
        let home = self.home_url()?;
        let html = dispatcher.fetch(home.as_str(), None).await?;
        parse_state_index(&html, &self.base_url)
    }

    /// Fetches and parses every site listed on a state page, in page order
    pub async fn sites_for_state<T: Transport>(
        &self,
        dispatcher: &mut Dispatcher<T>,
        state_url: &str,
    ) -> Result<Vec<Site>, ScrapeError> {
        let html = dispatcher.fetch(state_url, None).await?;
        let site_urls = parse_site_links(&html, &self.base_url)?;

        let mut sites = Vec::with_capacity(site_urls.len());
        for site_url in &site_urls {
            sites.push(self.site_from_url(dispatcher, site_url).await?);
        }
        Ok(sites)
    }

    /// Fetches and parses a single site detail page
    pub async fn site_from_url<T: Transport>(
        &self,
        dispatcher: &mut Dispatcher<T>,
        site_url: &str,
    ) -> Result<Site, ScrapeError> {
        let html = dispatcher.fetch(site_url, None).await?;
        parse_site(&html)
    }
}

impl Default for SiteDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the state dropdown from the home page
pub fn parse_state_index(html: &str, base_url: &Url) -> Result<StateIndex, ScrapeError> {
    let document = Html::parse_document(html);
    let dropdown = document
        .select(&selector("ul.dropdown-menu.SearchBar-keywordSearch"))
        .next()
        .ok_or_else(|| ScrapeError::Markup("state dropdown".to_string()))?;

    let link_selector = selector("a[href]");

    let mut index = StateIndex::new();
    for item in list_items(dropdown) {
        let href = item
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| ScrapeError::Markup("state link".to_string()))?;

        index.insert(&text_of(item), base_url.join(href)?.to_string());
    }
    Ok(index)
}

/// Extracts the detail-page URLs of every park on a state page
pub fn parse_site_links(html: &str, base_url: &Url) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);
    let park_list = document
        .select(&selector("ul#list_parks"))
        .next()
        .ok_or_else(|| ScrapeError::Markup("park list".to_string()))?;

    let link_selector = selector("div h3 a[href]");

    list_items(park_list)
        .map(|item| -> Result<String, ScrapeError> {
            let href = item
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or_else(|| ScrapeError::Markup("park link".to_string()))?;

            Ok(base_url.join(&format!("{href}index.htm"))?.to_string())
        })
        .collect()
}

/// Parses a park detail page into a [`Site`]
///
/// Every field except the phone number is required.
pub fn parse_site(html: &str) -> Result<Site, ScrapeError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let name = required_text(root, "div.Hero-titleContainer > a", "site name")?;
    let category = required_text(root, "div.Hero-designationContainer > span", "site category")?;
    let locality = required_text(root, r#"span[itemprop="addressLocality"]"#, "address locality")?;
    let region = required_text(root, r#"span[itemprop="addressRegion"]"#, "address region")?;
    let zipcode = required_text(root, r#"span[itemprop="postalCode"]"#, "postal code")?;
    let phone = root
        .select(&selector(r#"span[itemprop="telephone"]"#))
        .next()
        .map(text_of)
        .filter(|phone| !phone.is_empty());

    Ok(Site::new(
        category,
        name,
        format!("{locality}, {region}"),
        zipcode,
        phone,
    ))
}
