use super::decode_envelope;
use bitcode::{Decode, Encode};
use std::io;

/// Status byte of a successful response.
pub const STATUS_SUCCESS: u8 = 0;

/// The single reply to exactly one [`ExecuteRequest`](super::ExecuteRequest).
///
/// `status` carries an `IpcResultStatus` byte from `lab-bridge-service`. On
/// success only `resp` is meaningful; otherwise `resp` is absent and the
/// `err_*` fields describe the failure.
#[derive(Encode, Decode, PartialEq, Eq, Debug, Clone)]
pub struct ExecuteResponse {
    pub status: u8,
    pub resp: Option<Vec<u8>>,
    pub err_message: Option<String>,
    pub err_payload: Option<Vec<u8>>,
}

impl ExecuteResponse {
    pub fn success(resp: Vec<u8>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            resp: Some(resp),
            err_message: None,
            err_payload: None,
        }
    }

    pub fn failure(status: u8, message: impl Into<String>, payload: Option<Vec<u8>>) -> Self {
        Self {
            status,
            resp: None,
            err_message: Some(message.into()),
            err_payload: payload,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, io::Error> {
        decode_envelope(bytes)
    }
}
