//! Observable resource
//!
//! A [`Resource`] owns one [`Endpoint`], keeps the outcome of its most
//! recently completed load and pushes every new outcome to its observers.
//!
//! ```text
//! Uninitialized ──new()──▶ Loading ──▶ Ok | Err ──reload()──▶ Loading ──▶ …
//! ```
//!
//! While a reload is in flight the previous outcome stays visible. Reloads
//! are never cancelled by newer ones, so when two overlap the one that
//! *completes* last wins.
//!
//! # Examples
//! ```ignore
//! use litenews::{news, Executor, Resource, SiteConfig};
//!
//! let config = SiteConfig::default();
//! let executor = Executor::reqwest(&config)?;
//! let links = Resource::new(news::links_endpoint(&config), executor);
//! links.observe(|result| match result {
//!     Ok(items) => println!("{} stories", items.len()),
//!     Err(e) => eprintln!("{e}"),
//! });
//! ```

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::executor::Executor;
use crate::runtime;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Observer<A> = Arc<dyn Fn(&Result<A>) + Send + Sync>;

/// Handle returned by [`Resource::observe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct State<A> {
    latest: Option<Arc<Result<A>>>,
    updated_at: Option<DateTime<Utc>>,
    observers: Vec<(SubscriptionId, Observer<A>)>,
    next_id: u64,
    /// Outcomes waiting to be handed to observers, in the order they were
    /// stored.
    queue: VecDeque<Delivery<A>>,
    /// Set while some thread is draining `queue`.
    delivering: bool,
}

impl<A> State<A> {
    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.observers.iter().any(|(oid, _)| *oid == id)
    }
}

/// One outcome and the observers it is owed to.
struct Delivery<A> {
    value: Arc<Result<A>>,
    to: Vec<(SubscriptionId, Observer<A>)>,
}

struct Shared<A> {
    endpoint: Endpoint<A>,
    executor: Executor,
    state: Mutex<State<A>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A> Shared<A> {
    fn complete(&self, result: Result<A>) {
        let value = Arc::new(result);
        let mut state = lock(&self.state);
        state.latest = Some(Arc::clone(&value));
        state.updated_at = Some(Utc::now());
        let to = state.observers.clone();
        state.queue.push_back(Delivery { value, to });
        self.deliver(state);
    }

    /// Drain the queue unless another caller already is.
    ///
    /// Callbacks run with no lock held. Whoever finds the queue idle drains
    /// it, so deliveries stay in order and never overlap, and everyone else
    /// returns at once.
    fn deliver(&self, mut state: MutexGuard<'_, State<A>>) {
        if state.delivering {
            return;
        }
        state.delivering = true;
        drop(state);

        let _reset = ResetOnPanic(self);
        loop {
            let (value, to) = {
                let mut state = lock(&self.state);
                let Some(next) = state.queue.pop_front() else {
                    state.delivering = false;
                    return;
                };
                // Skip observers removed since the outcome was queued.
                let to: Vec<Observer<A>> = next
                    .to
                    .into_iter()
                    .filter(|(id, _)| state.is_subscribed(*id))
                    .map(|(_, o)| o)
                    .collect();
                (next.value, to)
            };
            for observer in to {
                observer(&value);
            }
        }
    }
}

/// Releases the draining role if a callback panics, so later outcomes are
/// still delivered.
struct ResetOnPanic<'a, A>(&'a Shared<A>);

impl<A> Drop for ResetOnPanic<'_, A> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(&self.0.state).delivering = false;
        }
    }
}

/// The latest outcome of repeatedly loading one endpoint.
pub struct Resource<A> {
    shared: Arc<Shared<A>>,
}

impl<A> std::fmt::Debug for Resource<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.shared.state);
        f.debug_struct("Resource")
            .field("endpoint", &self.shared.endpoint)
            .field("loaded", &state.latest.is_some())
            .field("observers", &state.observers.len())
            .finish()
    }
}

impl<A: Send + Sync + 'static> Resource<A> {
    /// Create the resource and start its first load right away.
    pub fn new(endpoint: Endpoint<A>, executor: Executor) -> Self {
        let resource = Self::idle(endpoint, executor, None);
        resource.reload();
        resource
    }

    /// Create a resource that already holds `value` and issues no request.
    ///
    /// Handy for previews and fixtures; `reload` still works as usual.
    pub fn with_value(endpoint: Endpoint<A>, executor: Executor, value: A) -> Self {
        Self::idle(endpoint, executor, Some(Arc::new(Ok(value))))
    }

    fn idle(endpoint: Endpoint<A>, executor: Executor, latest: Option<Arc<Result<A>>>) -> Self {
        let updated_at = latest.as_ref().map(|_| Utc::now());
        Self {
            shared: Arc::new(Shared {
                endpoint,
                executor,
                state: Mutex::new(State {
                    latest,
                    updated_at,
                    observers: Vec::new(),
                    next_id: 0,
                    queue: VecDeque::new(),
                    delivering: false,
                }),
            }),
        }
    }

    pub fn endpoint(&self) -> &Endpoint<A> {
        &self.shared.endpoint
    }

    /// Outcome of the most recently completed load, `None` before the first.
    pub fn latest(&self) -> Option<Arc<Result<A>>> {
        lock(&self.shared.state).latest.clone()
    }

    pub fn is_loaded(&self) -> bool {
        lock(&self.shared.state).latest.is_some()
    }

    /// When the current outcome was stored.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        lock(&self.shared.state).updated_at
    }

    /// Load the endpoint again in the background.
    ///
    /// Returns immediately. The current outcome stays in place until the
    /// load completes. If the resource is dropped first, the completion is
    /// discarded.
    pub fn reload(&self) {
        let weak = Arc::downgrade(&self.shared);
        let endpoint = self.shared.endpoint.clone();
        let executor = self.shared.executor.clone();
        runtime::spawn(async move {
            let result = executor.load(&endpoint).await;
            if let Some(shared) = weak.upgrade() {
                shared.complete(result);
            }
        });
    }

    /// Register `callback` for every completed load.
    ///
    /// If an outcome is already stored the callback receives it first. That
    /// happens before this returns, unless a delivery is running (for
    /// example when `observe` is called from inside a callback). In that
    /// case it is queued behind the running one.
    pub fn observe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Result<A>) + Send + Sync + 'static,
    {
        let observer: Observer<A> = Arc::new(callback);
        let mut state = lock(&self.shared.state);
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.observers.push((id, Arc::clone(&observer)));
        if let Some(value) = state.latest.clone() {
            state.queue.push_back(Delivery {
                value,
                to: vec![(id, observer)],
            });
            self.shared.deliver(state);
        }
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unobserve(&self, id: SubscriptionId) -> bool {
        let mut state = lock(&self.shared.state);
        let before = state.observers.len();
        state.observers.retain(|(oid, _)| *oid != id);
        state.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.shared.state).observers.len()
    }
}
