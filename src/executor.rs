//! Executor
//!
//! Runs an [`Endpoint`] through a [`Transport`] and classifies the outcome.
//! Exactly one of these decides the result, checked in this order:
//!
//! 1. the transport failed or the request timed out → [`LoadError::Transport`]
//! 2. the reply was not HTTP → [`LoadError::UnexpectedResponseType`]
//! 3. the status was rejected → [`LoadError::UnexpectedStatus`] (body is not parsed)
//! 4. otherwise the endpoint's parse step decides.
//!
//! There are no retries and nothing is cached.

use crate::config::SiteConfig;
use crate::endpoint::Endpoint;
use crate::error::{LoadError, Result, TransportError};
use crate::log::{log_error, log_info, log_start};
use crate::runtime;
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Stateless, cheap to clone; any number of loads may run at once.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Executor over a pooled reqwest client configured for `config`.
    pub fn reqwest(config: &SiteConfig) -> std::result::Result<Self, TransportError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Perform the call described by `endpoint` and interpret the response.
    pub async fn load<A: 'static>(&self, endpoint: &Endpoint<A>) -> Result<A> {
        let request = endpoint.request();
        let url = request.url.as_str();
        let start = Instant::now();
        log_start("load", request.method.as_str(), url);

        let sent = tokio::time::timeout(request.timeout, self.transport.send(request)).await;
        let outcome = match sent {
            Ok(outcome) => outcome,
            Err(_) => Err(TransportError::timed_out(request.timeout)),
        };

        let result = match outcome {
            Err(e) => Err(LoadError::Transport(e)),
            Ok(RawResponse::NotHttp) => Err(LoadError::UnexpectedResponseType),
            Ok(RawResponse::Http(resp)) => {
                let code = resp.status();
                if endpoint.accepts_status(code) {
                    endpoint.parse(resp.body.as_deref(), &resp.meta)
                } else {
                    Err(LoadError::UnexpectedStatus {
                        code,
                        response: Arc::new(resp),
                    })
                }
            }
        };

        match &result {
            Ok(_) => log_info("load", url, start.elapsed()),
            Err(e) => log_error("load", url, start.elapsed(), &e.to_string()),
        }
        result
    }

    /// Start a load in the background and return a handle to it.
    pub fn spawn<A>(&self, endpoint: Endpoint<A>) -> LoadTask<A>
    where
        A: Send + 'static,
    {
        let executor = self.clone();
        LoadTask {
            handle: runtime::spawn(async move { executor.load(&endpoint).await }),
        }
    }

    /// Blocking variant of [`load`](Self::load) driven on the shared runtime.
    ///
    /// Must not be called from inside an async context.
    pub fn load_blocking<A: 'static>(&self, endpoint: &Endpoint<A>) -> Result<A> {
        runtime::block_on(self.load(endpoint))
    }
}

/// A load running in the background.
///
/// Await it for the result, or [`cancel`](Self::cancel) it; a cancelled load
/// resolves to a transport error of kind `Cancelled`.
#[derive(Debug)]
pub struct LoadTask<A> {
    handle: JoinHandle<Result<A>>,
}

impl<A> LoadTask<A> {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<A> Future for LoadTask<A> {
    type Output = Result<A>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) => Err(LoadError::Transport(e.into())),
        })
    }
}
