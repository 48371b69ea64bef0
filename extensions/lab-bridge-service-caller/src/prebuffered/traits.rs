use crate::{IpcCaller, error::IpcCallerError};
use lab_bridge_service::prebuffered::IpcMethodPrebuffered;

/// Lets descriptors be called directly: `Echo::call(&caller, input)`.
#[async_trait::async_trait]
pub trait IpcCallPrebuffered: IpcMethodPrebuffered + Sized + Send + Sync {
    async fn call(caller: &IpcCaller, input: Self::Input) -> Result<Self::Output, IpcCallerError>;
}

#[async_trait::async_trait]
impl<T> IpcCallPrebuffered for T
where
    T: IpcMethodPrebuffered + Send + Sync + 'static,
    T::Input: Send + 'static,
    T::Output: Send + 'static,
{
    async fn call(caller: &IpcCaller, input: Self::Input) -> Result<Self::Output, IpcCallerError> {
        caller.run::<Self>(input).await
    }
}
