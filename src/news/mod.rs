//! News pages
//!
//! Endpoints for the lite news site: the index (a list of links) and the
//! article pages it points at. Both fetch HTML as a string and extract
//! records with `scraper`.

mod extract;
mod tests;
mod utils;

pub use extract::{parse_detail, parse_links};

use crate::config::SiteConfig;
use crate::endpoint::{append_path, parse_string, Endpoint};
use crate::types::{ArticleDetail, ContentType, LinkSummary};
use url::Url;

/// GET `url` as XML-ish HTML text with the site's headers and timeout.
pub fn page_endpoint(config: &SiteConfig, url: Url) -> Endpoint<String> {
    Endpoint::get(url)
        .accept(ContentType::Xml)
        .headers(&config.request_headers())
        .timeout(config.timeout())
        .parse(parse_string)
}

/// The index page as an ordered list of links.
///
/// # Examples
/// ```ignore
/// use litenews::{news, Executor, SiteConfig};
///
/// # async fn example() -> litenews::Result<()> {
/// let config = SiteConfig::default();
/// let executor = Executor::reqwest(&config)?;
/// for link in executor.load(&news::links_endpoint(&config)).await? {
///     println!("{} -> {}", link.title, link.id);
/// }
/// # Ok(())
/// # }
/// ```
pub fn links_endpoint(config: &SiteConfig) -> Endpoint<Vec<LinkSummary>> {
    let selectors = config.selectors.clone();
    page_endpoint(config, config.base_url.clone())
        .compact_map(move |html| Ok(parse_links(&html, &selectors)?))
}

/// The article at `id`, a path relative to the site root (a [`LinkSummary::id`]).
pub fn detail_endpoint(config: &SiteConfig, id: &str) -> Endpoint<ArticleDetail> {
    let selectors = config.selectors.clone();
    let id = id.to_string();
    page_endpoint(config, append_path(&config.base_url, &id))
        .compact_map(move |html| Ok(parse_detail(&id, &html, &selectors)?))
}
