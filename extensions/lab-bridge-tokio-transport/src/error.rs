use lab_bridge::SenderId;
use lab_bridge_service_endpoint::error::IpcServiceEndpointError;
use std::fmt;

#[derive(Debug)]
pub enum IpcTransportError {
    /// No window with this id was ever connected, or it has been closed.
    UnknownWindow(SenderId),
    /// The window is registered but its receive side is gone.
    WindowClosed(SenderId),
    Endpoint(IpcServiceEndpointError),
}

impl fmt::Display for IpcTransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcTransportError::UnknownWindow(sender) => write!(f, "Unknown window: {sender}"),
            IpcTransportError::WindowClosed(sender) => write!(f, "Window closed: {sender}"),
            IpcTransportError::Endpoint(e) => write!(f, "Endpoint error: {e}"),
        }
    }
}

impl std::error::Error for IpcTransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IpcTransportError::Endpoint(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IpcServiceEndpointError> for IpcTransportError {
    fn from(e: IpcServiceEndpointError) -> Self {
        IpcTransportError::Endpoint(e)
    }
}
