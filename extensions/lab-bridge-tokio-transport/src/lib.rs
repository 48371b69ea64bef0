//! Note: this transport is a reference implementation that connects a host
//! and its windows inside one process over tokio channels. Any transport that
//! can deliver `(channel, bytes)` pairs in both directions can drive an
//! [`IpcServiceEndpoint`](lab_bridge_service_endpoint::IpcServiceEndpoint) and
//! an [`IpcCaller`](lab_bridge_service_caller::IpcCaller) the same way.

pub mod error;

mod host;
pub use host::IpcHost;

mod window;
pub use window::WindowConnection;

/// One message as it travels between the host and a window.
pub type IpcMessage = (String, Vec<u8>);
