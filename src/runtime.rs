//! Shared Runtime

use once_cell::sync::Lazy;
use std::future::Future;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

/// Global multi-thread runtime used when the caller is not inside one.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .thread_name("litenews")
        .enable_all()
        .build()
        .expect("failed to build global runtime")
});

/// Spawn onto the caller's runtime if there is one, else the shared runtime.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => handle.spawn(future),
        Err(_) => RUNTIME.spawn(future),
    }
}

/// Run a future to completion on the shared runtime.
///
/// Panics if called from inside an async context.
pub fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    RUNTIME.block_on(future)
}
