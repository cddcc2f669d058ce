//! Base parse steps
//!
//! Leaf parsers that turn a raw body into a first value. Domain pipelines
//! start from one of these and refine with `map` / `compact_map`.

use crate::error::{LoadError, ParseError, Result};
use crate::transport::ResponseMeta;
use serde::de::DeserializeOwned;

/// The body bytes as-is.
pub fn parse_bytes(body: Option<&[u8]>, _meta: &ResponseMeta) -> Result<Vec<u8>> {
    body.map(<[u8]>::to_vec).ok_or(LoadError::MissingBody)
}

/// The body decoded as UTF-8.
pub fn parse_string(body: Option<&[u8]>, _meta: &ResponseMeta) -> Result<String> {
    let bytes = body.ok_or(LoadError::MissingBody)?;
    String::from_utf8(bytes.to_vec()).map_err(|e| ParseError::from(e).into())
}

/// The body deserialized from JSON.
pub fn parse_json<T: DeserializeOwned>(body: Option<&[u8]>, _meta: &ResponseMeta) -> Result<T> {
    let bytes = body.ok_or(LoadError::MissingBody)?;
    serde_json::from_slice(bytes).map_err(|e| ParseError::from(e).into())
}

/// Ignore the body; useful for calls where only the status matters.
pub fn parse_empty(_body: Option<&[u8]>, _meta: &ResponseMeta) -> Result<()> {
    Ok(())
}
