use lab_bridge_service::{IpcError, WindowRole};
use std::fmt;
use std::io;

/// Represents errors that can occur during a call from the perspective of the caller.
#[derive(Debug)]
pub enum IpcCallerError {
    /// Encoding the argument, or decoding the response or result, failed.
    Io(io::Error),
    /// The callee answered with a failure. Carries the error exactly as sent.
    Remote(IpcError),
    /// The connection went away before the response arrived.
    Disconnected(String),
    /// The window's role does not expose the method.
    NotExposed {
        method_id: &'static str,
        role: WindowRole,
    },
}

impl IpcCallerError {
    /// The remote failure, if the callee produced one.
    pub fn remote(&self) -> Option<&IpcError> {
        match self {
            IpcCallerError::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for IpcCallerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcCallerError::Io(e) => write!(f, "I/O error: {e}"),
            IpcCallerError::Remote(e) => write!(f, "Remote call failed: {e}"),
            IpcCallerError::Disconnected(reason) => write!(f, "Disconnected: {reason}"),
            IpcCallerError::NotExposed { method_id, role } => {
                write!(f, "Method {method_id} is not exposed to the {role} window")
            }
        }
    }
}

impl std::error::Error for IpcCallerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IpcCallerError::Io(e) => Some(e),
            IpcCallerError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IpcCallerError {
    fn from(e: io::Error) -> Self {
        IpcCallerError::Io(e)
    }
}

impl From<IpcError> for IpcCallerError {
    fn from(e: IpcError) -> Self {
        IpcCallerError::Remote(e)
    }
}
