//! Transport

mod client;
#[cfg(test)]
pub(crate) mod stub;
pub mod types;

pub use client::ReqwestTransport;
pub use types::*;

use crate::endpoint::Request;
use crate::error::TransportError;
use async_trait::async_trait;

/// Moves one request over the wire.
///
/// Implementations only report what came back; status validation, timeouts
/// and parsing belong to the [`Executor`](crate::Executor).
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, request: &Request) -> Result<RawResponse, TransportError>;
}
