//! Site configuration

use crate::types::{HeaderSet, Sel};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://lite.cnn.io";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_USER_AGENT: &str = concat!("litenews/", env!("CARGO_PKG_VERSION"));

/// Selectors used by the extraction pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// One node per index entry; its first child element carries the `href`.
    pub link_item: Sel,
    pub title: Sel,
    pub updated: Sel,
    /// Container whose direct children are the article paragraphs.
    pub content: Sel,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            link_item: Sel("li".into()),
            title: Sel("h2".into()),
            updated: Sel("#mount > div > div.afe4286c > div:nth-child(2)".into()),
            content: Sel("#mount > div > div.afe4286c > div:nth-child(3)".into()),
        }
    }
}

/// Everything the news endpoints need to know about the remote site.
///
/// Passed explicitly to the endpoint constructors; there is no global base
/// URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: Url,
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
    pub default_headers: HeaderSet,
    pub selectors: PageSelectors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            default_headers: HeaderSet::empty().with("Accept-Language", "en-US,en;q=0.9"),
            selectors: PageSelectors::default(),
        }
    }
}

impl SiteConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Load a config from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Default headers plus the user agent, if one is configured.
    pub fn request_headers(&self) -> HeaderSet {
        let mut headers = self.default_headers.clone();
        if let Some(ua) = &self.user_agent {
            headers.insert("user-agent", ua);
        }
        headers
    }
}

fn default_base_url() -> Url {
    match Url::parse(DEFAULT_BASE_URL) {
        Ok(u) => u,
        Err(e) => unreachable!("DEFAULT_BASE_URL is a valid url: {e}"),
    }
}
