use super::decode_envelope;
use bitcode::{Decode, Encode};
use std::io;

/// A trusted-to-untrusted event push, sent on the event channel.
#[derive(Encode, Decode, PartialEq, Eq, Debug, Clone)]
pub struct EventEmit {
    pub event_id: String,
    pub data: Vec<u8>,
}

impl EventEmit {
    pub fn new(event_id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            event_id: event_id.into(),
            data,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, io::Error> {
        decode_envelope(bytes)
    }
}
