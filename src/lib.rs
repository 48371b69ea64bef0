//! Core protocol pieces shared by both halves of the bridge.
//!
//! The bridge moves requests from an untrusted window context to the trusted
//! process over a single well-known request channel, and moves each reply back
//! on a response channel derived from the method id and a per-caller message
//! id. This crate holds the channel naming rules, the envelope shapes, and the
//! small utilities both sides need. The typed method layer, the caller, the
//! endpoint and concrete transports live in the `extensions/` crates.

pub mod channel;
pub mod constants;
pub mod envelope;
mod sender;
pub use sender::SenderId;
pub mod utils;
