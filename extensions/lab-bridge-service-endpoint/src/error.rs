use std::fmt;
use std::io;

#[derive(Debug)]
pub enum IpcServiceEndpointError {
    /// A handler is already registered under this method id.
    DuplicateMethod(String),
    /// Inbound bytes on the request channel were not a request envelope.
    Decode(io::Error),
    /// Event data could not be encoded.
    Encode(io::Error),
    /// Bytes arrived on a channel the endpoint does not serve.
    UnexpectedChannel(String),
}

impl fmt::Display for IpcServiceEndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcServiceEndpointError::DuplicateMethod(id) => {
                write!(f, "a handler for method {id} is already registered")
            }
            IpcServiceEndpointError::Decode(e) => write!(f, "malformed request envelope: {e}"),
            IpcServiceEndpointError::Encode(e) => write!(f, "failed to encode event data: {e}"),
            IpcServiceEndpointError::UnexpectedChannel(channel) => {
                write!(f, "no dispatch on channel {channel}")
            }
        }
    }
}

impl std::error::Error for IpcServiceEndpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IpcServiceEndpointError::Decode(e) | IpcServiceEndpointError::Encode(e) => Some(e),
            _ => None,
        }
    }
}
