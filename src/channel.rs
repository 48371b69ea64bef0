use crate::constants::{
    ASYNC_REMOTE_EMIT_EVENT, ASYNC_REMOTE_REQUEST_METHOD_EXECUTE,
    ASYNC_REMOTE_RESPOND_METHOD_EXECUTE, IPC_EMIT_EVENT, IPC_REQUEST_EXECUTE, IPC_RESPOND_EXECUTE,
    RESPONSE_CHANNEL_SEPARATOR,
};

/// Derives the transient channel a single response is delivered on.
///
/// The method id namespaces the channel and the message id (unique per caller
/// instance) makes it unique among live calls. The result always ends in
/// `-<decimal digits>`, which no fixed channel name does, so a response channel
/// can never be mistaken for a request, respond or event channel.
///
/// ```rust
/// use lab_bridge::channel::make_response_channel;
/// assert_eq!(make_response_channel("get-server-info", 7), "get-server-info-7");
/// ```
pub fn make_response_channel(method_id: &str, message_id: u64) -> String {
    format!("{method_id}{RESPONSE_CHANNEL_SEPARATOR}{message_id}")
}

/// Splits a response channel back into `(method_id, message_id)`.
///
/// Splits at the last separator, so method ids containing dashes round-trip.
/// Returns `None` for anything [`make_response_channel`] could not have
/// produced.
pub fn parse_response_channel(channel: &str) -> Option<(&str, u64)> {
    let (method_id, message_id) = channel.rsplit_once(RESPONSE_CHANNEL_SEPARATOR)?;

    if message_id.is_empty() || !message_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let message_id = message_id.parse::<u64>().ok()?;
    Some((method_id, message_id))
}

/// The fixed channel names one protocol instance runs on.
///
/// Both ends of a connection must be built with the same set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProtocolChannels {
    /// Every outbound request of every method is sent here.
    pub request: &'static str,
    /// Reserved; not used for dispatch.
    pub respond: &'static str,
    /// Trusted-to-untrusted event pushes.
    pub event: &'static str,
}

impl ProtocolChannels {
    pub const EXPOSED_METHOD: ProtocolChannels = ProtocolChannels {
        request: IPC_REQUEST_EXECUTE,
        respond: IPC_RESPOND_EXECUTE,
        event: IPC_EMIT_EVENT,
    };

    pub const ASYNC_REMOTE: ProtocolChannels = ProtocolChannels {
        request: ASYNC_REMOTE_REQUEST_METHOD_EXECUTE,
        respond: ASYNC_REMOTE_RESPOND_METHOD_EXECUTE,
        event: ASYNC_REMOTE_EMIT_EVENT,
    };

    /// Whether `channel` is one of this set's fixed names.
    pub fn is_fixed(&self, channel: &str) -> bool {
        channel == self.request || channel == self.respond || channel == self.event
    }
}

impl Default for ProtocolChannels {
    fn default() -> Self {
        Self::EXPOSED_METHOD
    }
}
