use crate::error::IpcCallerError;
use futures::channel::oneshot;
use std::collections::HashMap;

pub(crate) type CallResult = Result<Vec<u8>, IpcCallerError>;

pub(crate) struct PendingCall {
    pub(crate) method_id: String,
    pub(crate) tx: oneshot::Sender<CallResult>,
}

/// Outstanding calls keyed by message id.
///
/// An entry exists from just before a request is sent until its response is
/// taken, the call is abandoned, or the connection is torn down.
#[derive(Default)]
pub(crate) struct PendingCalls {
    calls: HashMap<u64, PendingCall>,
    closed: Option<String>,
}

impl PendingCalls {
    /// Registers a call. Returns `None` once the table is closed.
    pub(crate) fn insert(
        &mut self,
        message_id: u64,
        method_id: &str,
    ) -> Option<oneshot::Receiver<CallResult>> {
        if self.closed.is_some() {
            return None;
        }

        let (tx, rx) = oneshot::channel();
        self.calls.insert(
            message_id,
            PendingCall {
                method_id: method_id.to_string(),
                tx,
            },
        );
        Some(rx)
    }

    /// Takes the entry for `message_id` only if it was issued for `method_id`.
    pub(crate) fn take_matching(
        &mut self,
        message_id: u64,
        method_id: &str,
    ) -> Option<PendingCall> {
        match self.calls.get(&message_id) {
            Some(call) if call.method_id == method_id => self.calls.remove(&message_id),
            _ => None,
        }
    }

    pub(crate) fn remove(&mut self, message_id: u64) -> bool {
        self.calls.remove(&message_id).is_some()
    }

    pub(crate) fn contains(&self, message_id: u64) -> bool {
        self.calls.contains_key(&message_id)
    }

    pub(crate) fn drain(&mut self) -> Vec<PendingCall> {
        self.calls.drain().map(|(_, call)| call).collect()
    }

    /// Refuses further calls and hands back the outstanding ones.
    pub(crate) fn close(&mut self, reason: &str) -> Vec<PendingCall> {
        self.closed.get_or_insert_with(|| reason.to_string());
        self.drain()
    }

    pub(crate) fn closed_reason(&self) -> Option<&str> {
        self.closed.as_deref()
    }

    pub(crate) fn len(&self) -> usize {
        self.calls.len()
    }
}
