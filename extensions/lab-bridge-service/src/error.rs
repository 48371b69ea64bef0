use crate::IpcResultStatus;
use lab_bridge::envelope::ExecuteResponse;
use std::fmt;

/// Lets a handler forward a raw error payload to the caller without the
/// endpoint wrapping it into a message string.
///
/// Return it boxed from a handler; the caller receives the bytes untouched in
/// [`IpcError::payload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPayloadError(pub Vec<u8>);

impl fmt::Display for HandlerPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler failed with a {} byte payload", self.0.len())
    }
}

impl std::error::Error for HandlerPayloadError {}

/// The failure half of a response.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IpcErrorKind {
    /// The handler returned an error.
    HandlerFailed,
    /// The handler panicked, or the response could not be interpreted.
    SystemError,
    /// No handler is registered under the requested method id.
    MethodNotFound,
    /// The sending window's role does not expose the method.
    Unauthorized,
}

impl IpcErrorKind {
    pub fn status(self) -> IpcResultStatus {
        match self {
            IpcErrorKind::HandlerFailed => IpcResultStatus::Fail,
            IpcErrorKind::SystemError => IpcResultStatus::SystemError,
            IpcErrorKind::MethodNotFound => IpcResultStatus::MethodNotFound,
            IpcErrorKind::Unauthorized => IpcResultStatus::Unauthorized,
        }
    }

    /// Maps a failure status back to its kind. `Success` has no kind.
    pub fn from_status(status: IpcResultStatus) -> Option<Self> {
        match status {
            IpcResultStatus::Success => None,
            IpcResultStatus::Fail => Some(IpcErrorKind::HandlerFailed),
            IpcResultStatus::SystemError => Some(IpcErrorKind::SystemError),
            IpcResultStatus::MethodNotFound => Some(IpcErrorKind::MethodNotFound),
            IpcResultStatus::Unauthorized => Some(IpcErrorKind::Unauthorized),
        }
    }
}

/// A structured remote failure, carried as data across the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpcError {
    pub kind: IpcErrorKind,
    pub method_id: String,
    pub message: String,
    /// Raw bytes from a [`HandlerPayloadError`], if the handler supplied one.
    pub payload: Option<Vec<u8>>,
}

impl IpcError {
    pub fn new(
        kind: IpcErrorKind,
        method_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            method_id: method_id.into(),
            message: message.into(),
            payload: None,
        }
    }

    pub fn method_not_found(method_id: &str) -> Self {
        Self::new(
            IpcErrorKind::MethodNotFound,
            method_id,
            format!("Method {method_id} does not exist."),
        )
    }

    pub fn unauthorized(method_id: &str, role: Option<&str>) -> Self {
        let message = match role {
            Some(role) => format!("Method {method_id} is not exposed to the {role} window."),
            None => format!("Method {method_id} is not exposed to windows without a role."),
        };
        Self::new(IpcErrorKind::Unauthorized, method_id, message)
    }

    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Builds the failure response envelope for this error.
    pub fn to_response(&self) -> ExecuteResponse {
        ExecuteResponse::failure(
            self.kind.status().into(),
            self.message.clone(),
            self.payload.clone(),
        )
    }

    /// Turns a decoded response into the tagged result callers see.
    ///
    /// An unknown status byte is reported as a `SystemError`; a success
    /// without a `resp` is treated as an empty result.
    pub fn response_into_result(
        method_id: &str,
        response: ExecuteResponse,
    ) -> Result<Vec<u8>, IpcError> {
        let kind = match IpcResultStatus::try_from(response.status) {
            Ok(status) => IpcErrorKind::from_status(status),
            Err(_) => Some(IpcErrorKind::SystemError),
        };

        match kind {
            None => Ok(response.resp.unwrap_or_default()),
            Some(kind) => Err(IpcError {
                kind,
                method_id: method_id.to_string(),
                message: response
                    .err_message
                    .unwrap_or_else(|| format!("unrecognized response status {}", response.status)),
                payload: response.err_payload,
            }),
        }
    }
}

impl fmt::Display for IpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} in {}: {}", self.kind, self.method_id, self.message)
    }
}

impl std::error::Error for IpcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_round_trips_through_error() {
        let err = IpcError::new(IpcErrorKind::HandlerFailed, "boom", "fail")
            .with_payload(b"raw".to_vec());
        let result = IpcError::response_into_result("boom", err.to_response());
        assert_eq!(result, Err(err));
    }

    #[test]
    fn unknown_status_is_system_error() {
        let response = ExecuteResponse {
            status: 200,
            resp: None,
            err_message: None,
            err_payload: None,
        };
        let err = IpcError::response_into_result("echo", response).unwrap_err();
        assert_eq!(err.kind, IpcErrorKind::SystemError);
        assert!(err.message.contains("200"));
    }

    #[test]
    fn not_found_mentions_method() {
        let err = IpcError::method_not_found("missing");
        assert_eq!(err.kind, IpcErrorKind::MethodNotFound);
        assert!(err.to_string().contains("missing"));
    }
}
