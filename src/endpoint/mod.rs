//! Endpoints
//!
//! An [`Endpoint<A>`] pairs an immutable [`Request`] with the two rules that
//! decide what its response means: which status codes count as success and
//! how to turn the body into an `A`. Endpoints are plain values; nothing
//! touches the network until one is handed to an
//! [`Executor`](crate::Executor).
//!
//! # Examples
//! ```ignore
//! use litenews::endpoint::{parse_string, Endpoint};
//! use litenews::ContentType;
//!
//! let url = url::Url::parse("https://lite.cnn.io").unwrap();
//! let words = Endpoint::get(url)
//!     .accept(ContentType::Xml)
//!     .query("page", "2")
//!     .parse(parse_string)
//!     .map(|html| html.split_whitespace().count());
//! ```

mod parse;
mod request;

pub use parse::*;
pub use request::{Request, DEFAULT_TIMEOUT};
pub(crate) use request::append_path;

use crate::error::Result;
use crate::transport::ResponseMeta;
use crate::types::{ContentType, HeaderSet, Method};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Decides whether a status code counts as success.
pub type StatusPredicate = Arc<dyn Fn(u16) -> bool + Send + Sync>;

type ParseFn<A> = dyn Fn(Option<&[u8]>, &ResponseMeta) -> Result<A> + Send + Sync;

/// Returns `true` if `code` is in the 200..300 range.
pub fn expected_2xx(code: u16) -> bool {
    (200..300).contains(&code)
}

/// A request plus a way to interpret its response as an `A`.
pub struct Endpoint<A> {
    request: Arc<Request>,
    expected_status: StatusPredicate,
    parse: Arc<ParseFn<A>>,
}

impl<A> Clone for Endpoint<A> {
    fn clone(&self) -> Self {
        Self {
            request: Arc::clone(&self.request),
            expected_status: Arc::clone(&self.expected_status),
            parse: Arc::clone(&self.parse),
        }
    }
}

impl<A> fmt::Debug for Endpoint<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.request.method)
            .field("url", &self.request.url.as_str())
            .field("timeout", &self.request.timeout)
            .finish_non_exhaustive()
    }
}

impl Endpoint<()> {
    pub fn builder(method: Method, url: Url) -> EndpointBuilder {
        EndpointBuilder::new(method, url)
    }

    pub fn get(url: Url) -> EndpointBuilder {
        EndpointBuilder::new(Method::Get, url)
    }
}

impl<A: 'static> Endpoint<A> {
    /// Create an endpoint from an already complete request.
    pub fn from_request<S, F>(request: Request, expected_status: S, parse: F) -> Self
    where
        S: Fn(u16) -> bool + Send + Sync + 'static,
        F: Fn(Option<&[u8]>, &ResponseMeta) -> Result<A> + Send + Sync + 'static,
    {
        Self {
            request: Arc::new(request),
            expected_status: Arc::new(expected_status),
            parse: Arc::new(parse),
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn url(&self) -> &Url {
        &self.request.url
    }

    pub fn accepts_status(&self, code: u16) -> bool {
        (self.expected_status)(code)
    }

    /// Run the parse step on a response that already passed status checks.
    pub fn parse(&self, body: Option<&[u8]>, meta: &ResponseMeta) -> Result<A> {
        (self.parse)(body, meta)
    }

    /// Transform a successful value; failures pass through untouched.
    pub fn map<B, F>(&self, f: F) -> Endpoint<B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let parse = Arc::clone(&self.parse);
        Endpoint {
            request: Arc::clone(&self.request),
            expected_status: Arc::clone(&self.expected_status),
            parse: Arc::new(move |body: Option<&[u8]>, meta: &ResponseMeta| {
                parse(body, meta).map(&f)
            }),
        }
    }

    /// Transform a successful value with a step that can itself fail.
    ///
    /// This is where HTML extraction plugs into a string endpoint.
    pub fn compact_map<B, F>(&self, f: F) -> Endpoint<B>
    where
        B: 'static,
        F: Fn(A) -> Result<B> + Send + Sync + 'static,
    {
        let parse = Arc::clone(&self.parse);
        Endpoint {
            request: Arc::clone(&self.request),
            expected_status: Arc::clone(&self.expected_status),
            parse: Arc::new(move |body: Option<&[u8]>, meta: &ResponseMeta| {
                parse(body, meta).and_then(&f)
            }),
        }
    }

    /// Whether `other` shares this endpoint's request.
    pub fn same_request<B>(&self, other: &Endpoint<B>) -> bool {
        Arc::ptr_eq(&self.request, &other.request)
    }
}

/// Builds an [`Endpoint`] from discrete parameters.
///
/// Defaults: no headers, no body, 10 second timeout, 2xx accepted.
pub struct EndpointBuilder {
    method: Method,
    url: Url,
    accept: Option<ContentType>,
    content_type: Option<ContentType>,
    headers: HeaderSet,
    body: Option<Vec<u8>>,
    timeout: Duration,
    query: Vec<(String, String)>,
    expected_status: StatusPredicate,
}

impl EndpointBuilder {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            accept: None,
            content_type: None,
            headers: HeaderSet::empty(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            query: Vec::new(),
            expected_status: Arc::new(expected_2xx),
        }
    }

    pub fn accept(mut self, ct: ContentType) -> Self {
        self.accept = Some(ct);
        self
    }

    pub fn content_type(mut self, ct: ContentType) -> Self {
        self.content_type = Some(ct);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: &HeaderSet) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append one query parameter. Order is kept and duplicates are allowed.
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn expected_status<S>(mut self, predicate: S) -> Self
    where
        S: Fn(u16) -> bool + Send + Sync + 'static,
    {
        self.expected_status = Arc::new(predicate);
        self
    }

    /// Resolve the request and attach the parse step.
    pub fn parse<A, F>(self, parse: F) -> Endpoint<A>
    where
        A: 'static,
        F: Fn(Option<&[u8]>, &ResponseMeta) -> Result<A> + Send + Sync + 'static,
    {
        let mut headers = HeaderSet::empty();
        if let Some(a) = self.accept {
            headers.insert("accept", a.mime());
        }
        if let Some(ct) = self.content_type {
            headers.insert("content-type", ct.mime());
        }
        headers.extend(&self.headers);

        let request = Request {
            method: self.method,
            url: request::with_query(self.url, &self.query),
            headers,
            body: self.body,
            timeout: self.timeout,
        };

        Endpoint {
            request: Arc::new(request),
            expected_status: self.expected_status,
            parse: Arc::new(parse),
        }
    }
}
