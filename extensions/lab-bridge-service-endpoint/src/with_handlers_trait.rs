use crate::endpoint::IpcPrebufferedHandler;
use std::collections::HashMap;
use std::sync::PoisonError;

/// Closure-passing access to the handler registry.
///
/// Abstracts over `tokio::sync::Mutex` and `std::sync::Mutex` so the dispatch
/// logic is written once. Implementations lock, run `f`, and unlock; callers
/// must clone anything they need out of the map instead of holding on to it.
#[async_trait::async_trait]
pub trait WithHandlers: Send + Sync {
    async fn with_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, IpcPrebufferedHandler>) -> R + Send,
        R: Send;
}

#[cfg(feature = "tokio_support")]
#[async_trait::async_trait]
impl WithHandlers for tokio::sync::Mutex<HashMap<String, IpcPrebufferedHandler>> {
    async fn with_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, IpcPrebufferedHandler>) -> R + Send,
        R: Send,
    {
        let mut guard = self.lock().await;
        f(&mut guard)
    }
}

// Every critical section is a single map operation; a poisoned lock still
// guards a consistent map.
#[async_trait::async_trait]
impl WithHandlers for std::sync::Mutex<HashMap<String, IpcPrebufferedHandler>> {
    async fn with_handlers<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, IpcPrebufferedHandler>) -> R + Send,
        R: Send,
    {
        let mut guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
