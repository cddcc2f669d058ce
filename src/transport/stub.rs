//! Scripted transports for tests.

use super::types::{HttpResponse, RawResponse, ResponseMeta};
use super::Transport;
use crate::endpoint::Request;
use crate::error::{TransportError, TransportErrorKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub(crate) type Outcome = Result<RawResponse, TransportError>;

pub(crate) fn http(status: u16, body: &str) -> Outcome {
    let url = url::Url::parse("http://stub.test/").unwrap();
    Ok(RawResponse::Http(HttpResponse::new(
        ResponseMeta::new(url, status),
        Some(body.as_bytes().to_vec()),
    )))
}

pub(crate) fn http_without_body(status: u16) -> Outcome {
    let url = url::Url::parse("http://stub.test/").unwrap();
    Ok(RawResponse::Http(HttpResponse::new(
        ResponseMeta::new(url, status),
        None,
    )))
}

pub(crate) fn connect_error(msg: &str) -> Outcome {
    Err(TransportError::new(TransportErrorKind::Connect, msg))
}

/// Answers every request with the same outcome.
pub(crate) struct FixedTransport {
    outcome: Outcome,
    calls: AtomicUsize,
    requests: Mutex<Vec<Request>>,
}

impl FixedTransport {
    pub(crate) fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for FixedTransport {
    fn name(&self) -> &'static str {
        "fixed-stub"
    }

    async fn send(&self, request: &Request) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

/// Each call waits for an outcome the test sends later, in call order.
///
/// Calls beyond the scripted ones fail with a connect error.
pub(crate) struct ScriptedTransport {
    pending: Mutex<VecDeque<oneshot::Receiver<Outcome>>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Script the next call; resolve it through the returned sender.
    pub(crate) fn expect_call(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Yield until at least `n` calls have reached the transport.
    pub(crate) async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &'static str {
        "scripted-stub"
    }

    async fn send(&self, _request: &Request) -> Outcome {
        let rx = self.pending.lock().unwrap().pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(TransportError::cancelled())),
            None => connect_error("no scripted response"),
        }
    }
}

/// Never answers; only a timeout or cancellation ends the call.
pub(crate) struct HangingTransport;

#[async_trait]
impl Transport for HangingTransport {
    fn name(&self) -> &'static str {
        "hanging-stub"
    }

    async fn send(&self, _request: &Request) -> Outcome {
        std::future::pending::<Outcome>().await
    }
}
