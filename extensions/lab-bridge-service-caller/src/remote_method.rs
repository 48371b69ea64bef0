use crate::{IpcCaller, error::IpcCallerError};
use lab_bridge_service::prebuffered::IpcMethodPrebuffered;
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed function for one remote method, bound to a caller.
///
/// Every call resolves with exactly the callee's result for that call.
pub struct RemoteMethod<M> {
    caller: Arc<IpcCaller>,
    _method: PhantomData<fn() -> M>,
}

impl<M: IpcMethodPrebuffered> RemoteMethod<M> {
    pub(crate) fn new(caller: Arc<IpcCaller>) -> Self {
        Self {
            caller,
            _method: PhantomData,
        }
    }

    pub fn method_id(&self) -> &'static str {
        M::METHOD_ID
    }

    pub async fn call(&self, input: M::Input) -> Result<M::Output, IpcCallerError> {
        self.caller.run::<M>(input).await
    }
}

impl<M> Clone for RemoteMethod<M> {
    fn clone(&self) -> Self {
        Self {
            caller: Arc::clone(&self.caller),
            _method: PhantomData,
        }
    }
}

impl<M: IpcMethodPrebuffered> std::fmt::Debug for RemoteMethod<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMethod")
            .field("method_id", &M::METHOD_ID)
            .finish()
    }
}
