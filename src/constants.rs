/// Request channel of the exposed-method protocol variant.
pub const IPC_REQUEST_EXECUTE: &str = "ipc-request-execute";

/// Acknowledgement channel of the exposed-method variant.
///
/// Reserved so that no method can ever shadow it, but nothing is dispatched
/// on it.
pub const IPC_RESPOND_EXECUTE: &str = "ipc-respond-execute";

/// Event channel of the exposed-method variant.
pub const IPC_EMIT_EVENT: &str = "ipc-emit-event";

/// Request channel of the async-remote protocol variant.
pub const ASYNC_REMOTE_REQUEST_METHOD_EXECUTE: &str = "async-remote:request-method-execute";

/// Reserved acknowledgement channel of the async-remote variant.
pub const ASYNC_REMOTE_RESPOND_METHOD_EXECUTE: &str = "async-remote:respond-method-execute";

/// Event channel of the async-remote variant.
pub const ASYNC_REMOTE_EMIT_EVENT: &str = "async-remote:emit-event";

/// Separator between the method id and the message id in a response channel.
pub const RESPONSE_CHANNEL_SEPARATOR: char = '-';
