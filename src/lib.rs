#![doc = include_str!("../README.md")]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod executor;
mod log;
pub mod news;
pub mod resource;
pub mod runtime;
pub mod transport;
pub mod types;

pub use config::{PageSelectors, SiteConfig};
pub use endpoint::{Endpoint, EndpointBuilder, Request};
pub use error::{LoadError, ParseError, Result, TransportError, TransportErrorKind};
pub use executor::{Executor, LoadTask};
pub use resource::{Resource, SubscriptionId};
pub use transport::{HttpResponse, RawResponse, ResponseMeta, Transport};
pub use types::*;
