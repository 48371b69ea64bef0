mod caller;
pub use caller::{IpcCaller, IpcEmitFn};

pub mod error;

mod event_listeners;
pub use event_listeners::ListenerId;

mod exposed_api;
pub use exposed_api::ExposedApi;

mod pending_calls;

pub mod prebuffered;

mod remote_method;
pub use remote_method::RemoteMethod;
