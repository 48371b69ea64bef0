//! Wire-level message shapes exchanged over the transport.
//!
//! All envelopes are `bitcode`-encoded. Argument, result and event data are
//! opaque byte payloads here; the method and event descriptors in
//! `lab-bridge-service` give them their types.

mod event_emit;
mod execute_request;
mod execute_response;

pub use event_emit::EventEmit;
pub use execute_request::ExecuteRequest;
pub use execute_response::ExecuteResponse;

use std::io;

pub(crate) fn decode_envelope<T>(bytes: &[u8]) -> Result<T, io::Error>
where
    T: for<'a> bitcode::Decode<'a>,
{
    bitcode::decode::<T>(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
