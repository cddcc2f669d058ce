use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Built-in content types for `Accept` / `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Json,
    Xml,
    Html,
    Text,
}

impl ContentType {
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Xml => "application/xml",
            ContentType::Html => "text/html",
            ContentType::Text => "text/plain",
        }
    }
}

/// Request headers keyed by lower-cased name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderSet(pub BTreeMap<String, String>);

impl HeaderSet {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }
    pub fn with(mut self, k: &str, v: &str) -> Self {
        self.insert(k, v);
        self
    }
    pub fn insert(&mut self, k: &str, v: &str) {
        self.0.insert(k.to_ascii_lowercase(), v.to_string());
    }
    pub fn get(&self, k: &str) -> Option<&str> {
        self.0.get(&k.to_ascii_lowercase()).map(String::as_str)
    }
    pub fn extend(&mut self, other: &HeaderSet) {
        for (k, v) in &other.0 {
            self.insert(k, v);
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A CSS selector as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sel(pub String);

impl From<&str> for Sel {
    fn from(s: &str) -> Self {
        Sel(s.to_string())
    }
}

/// One entry of the index page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkSummary {
    /// Relative path of the article, e.g. `/en/article/h_6898…`.
    pub id: String,
    pub title: String,
}

/// A single article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    pub id: String,
    pub title: String,
    pub updated_label: String,
    /// Paragraph texts separated by a blank line.
    pub content: String,
}

impl ArticleDetail {
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split("\n\n").filter(|p| !p.is_empty())
    }
}
