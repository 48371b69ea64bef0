use super::decode_envelope;
use crate::channel::make_response_channel;
use bitcode::{Decode, Encode};
use std::io;

/// A single outbound call.
///
/// Created at call time, encoded once, sent once on the request channel and
/// never retried.
#[derive(Encode, Decode, PartialEq, Eq, Debug, Clone)]
pub struct ExecuteRequest {
    /// Unique per caller instance; only used to derive the response channel.
    pub message_id: u64,
    /// Routing key; must match a registered method on the receiving side.
    pub method_id: String,
    /// Descriptor-encoded argument.
    pub arg: Vec<u8>,
}

impl ExecuteRequest {
    pub fn new(message_id: u64, method_id: impl Into<String>, arg: Vec<u8>) -> Self {
        Self {
            message_id,
            method_id: method_id.into(),
            arg,
        }
    }

    /// The channel the single reply to this request is sent on.
    pub fn response_channel(&self) -> String {
        make_response_channel(&self.method_id, self.message_id)
    }

    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, io::Error> {
        decode_envelope(bytes)
    }
}
