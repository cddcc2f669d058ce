use super::types::{HttpResponse, RawResponse, ResponseMeta};
use super::Transport;
use crate::config::SiteConfig;
use crate::endpoint::Request;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;

const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;
const POOL_MAX_IDLE_PER_HOST: usize = 16;

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &SiteConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Build a reqwest client for the given site.
///
/// The client timeout is a default. Each [`Request`] sets its own timeout,
/// which replaces it for that request, longer or shorter.
pub(crate) fn build_client(config: &SiteConfig) -> Result<Client, TransportError> {
    let mut builder = Client::builder()
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(config.timeout().max(Duration::from_millis(1)))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST);

    if let Some(ua) = &config.user_agent {
        builder = builder.user_agent(ua.clone());
    }

    Ok(builder.build()?)
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn send(&self, request: &Request) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .timeout(request.timeout);
        for (k, v) in request.headers.iter() {
            builder = builder.header(k, v);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let meta = ResponseMeta {
            url: resp.url().clone(),
            status: status.as_u16(),
            headers: resp
                .headers()
                .iter()
                .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
                .collect(),
        };
        let bytes = resp.bytes().await?;

        let body = if bytes.is_empty() && has_no_body(status) {
            None
        } else {
            Some(bytes.to_vec())
        };

        Ok(RawResponse::Http(HttpResponse::new(meta, body)))
    }
}

fn has_no_body(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED
}
