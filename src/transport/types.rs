use url::Url;

/// What a transport got back.
#[derive(Debug, Clone)]
pub enum RawResponse {
    Http(HttpResponse),
    /// A reply that cannot be read as HTTP (no status line).
    NotHttp,
}

/// Status line and headers of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub url: Url,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ResponseMeta {
    pub fn new(url: Url, status: u16) -> Self {
        Self {
            url,
            status,
            headers: Vec::new(),
        }
    }

    /// First value of header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub meta: ResponseMeta,
    /// `None` when the response has no body at all (e.g. `204 No Content`).
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(meta: ResponseMeta, body: Option<Vec<u8>>) -> Self {
        Self { meta, body }
    }

    pub fn status(&self) -> u16 {
        self.meta.status
    }

    /// Body as lossy UTF-8, for diagnostics.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}
