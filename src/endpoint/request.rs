use crate::types::{HeaderSet, Method};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully resolved HTTP request.
///
/// Fields are public so callers can build one by hand and hand it to
/// [`Endpoint::from_request`](super::Endpoint::from_request); once inside an
/// endpoint it is only reachable by shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderSet,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderSet::empty(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

/// Append `query` to `url` in order, keeping any query the URL already has.
///
/// An empty `query` leaves the URL untouched.
pub(crate) fn with_query(mut url: Url, query: &[(String, String)]) -> Url {
    if query.is_empty() {
        return url;
    }
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    url
}

/// Resolve a site-relative identifier (an `href` as found on the page)
/// beneath `base`.
///
/// `https://h/news` + `/en/article/x` gives `https://h/news/en/article/x`.
/// The identifier is taken as already encoded: escapes and any query it
/// carries are kept as they are.
pub(crate) fn append_path(base: &Url, path: &str) -> Url {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let with_slash = format!("{}/", dir.path());
        dir.set_path(&with_slash);
    }
    match dir.join(path.trim_start_matches('/')) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(base = base.as_str(), path, error = %e, "cannot resolve path");
            base.clone()
        }
    }
}
