use crate::error::IpcCallerError;
use crate::event_listeners::{EventListeners, ListenerId};
use crate::pending_calls::{CallResult, PendingCall, PendingCalls};
use crate::remote_method::RemoteMethod;
use lab_bridge::{
    channel::{ProtocolChannels, make_response_channel, parse_response_channel},
    envelope::{EventEmit, ExecuteRequest, ExecuteResponse},
    utils::MessageIdCounter,
};
use lab_bridge_service::{IpcError, IpcEvent, prebuffered::IpcMethodPrebuffered};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sends `(channel, bytes)` towards the callee.
pub type IpcEmitFn = Arc<dyn Fn(&str, Vec<u8>) + Send + Sync>;

/// The untrusted-context half of the bridge.
///
/// Owns its message id counter and its table of outstanding calls; nothing is
/// shared between instances. Whatever receives bytes from the transport must
/// feed them to [`IpcCaller::handle_inbound`].
pub struct IpcCaller {
    message_ids: MessageIdCounter,
    pending: Mutex<PendingCalls>,
    event_listeners: Mutex<EventListeners>,
    emit: IpcEmitFn,
    channels: ProtocolChannels,
}

impl IpcCaller {
    pub fn new<F>(emit: F) -> Self
    where
        F: Fn(&str, Vec<u8>) + Send + Sync + 'static,
    {
        Self {
            message_ids: MessageIdCounter::new(),
            pending: Mutex::new(PendingCalls::default()),
            event_listeners: Mutex::new(EventListeners::default()),
            emit: Arc::new(emit),
            channels: ProtocolChannels::default(),
        }
    }

    pub fn with_channels(mut self, channels: ProtocolChannels) -> Self {
        self.channels = channels;
        self
    }

    pub fn channels(&self) -> ProtocolChannels {
        self.channels
    }

    /// Invokes `M` remotely and decodes its result.
    pub async fn run<M>(&self, input: M::Input) -> Result<M::Output, IpcCallerError>
    where
        M: IpcMethodPrebuffered,
    {
        let arg = M::encode_request(input)?;
        let bytes = self.call_raw(M::METHOD_ID, arg).await?;
        Ok(M::decode_response(&bytes)?)
    }

    /// Sends one request for `method_id` and waits for its response.
    ///
    /// The pending entry is registered before anything is emitted, so a
    /// response that arrives synchronously during the emit is still routed.
    /// Dropping the returned future removes the entry.
    pub async fn call_raw(&self, method_id: &str, arg: Vec<u8>) -> CallResult {
        let message_id = self.message_ids.next_id();
        let rx = {
            let mut pending = self.lock_pending();
            match pending.insert(message_id, method_id) {
                Some(rx) => rx,
                None => {
                    let reason = pending.closed_reason().unwrap_or("caller closed");
                    return Err(IpcCallerError::Disconnected(reason.to_string()));
                }
            }
        };
        let mut guard = PendingGuard {
            caller: self,
            message_id,
            armed: true,
        };

        let request = ExecuteRequest::new(message_id, method_id, arg);
        tracing::trace!(
            "sending {} on {}, awaiting {}",
            method_id,
            self.channels.request,
            make_response_channel(method_id, message_id)
        );
        (self.emit)(self.channels.request, request.encode());

        let result = rx.await;
        guard.armed = false;

        match result {
            Ok(result) => result,
            Err(_) => Err(IpcCallerError::Disconnected(format!(
                "response for {method_id} (message {message_id}) was dropped"
            ))),
        }
    }

    /// A reusable, typed handle to `M` bound to this caller.
    pub fn create_remote_method<M>(self: &Arc<Self>) -> RemoteMethod<M>
    where
        M: IpcMethodPrebuffered,
    {
        RemoteMethod::new(Arc::clone(self))
    }

    /// Routes bytes that arrived from the callee.
    ///
    /// Returns `false` when nothing was waiting for them: an unknown channel,
    /// a response nobody is pending on, or a response that was already
    /// delivered.
    pub fn handle_inbound(&self, channel: &str, bytes: &[u8]) -> bool {
        if channel == self.channels.event {
            return self.handle_event(bytes);
        }

        let Some((method_id, message_id)) = parse_response_channel(channel) else {
            tracing::debug!("ignoring message on unrelated channel {}", channel);
            return false;
        };

        let Some(call) = self.lock_pending().take_matching(message_id, method_id) else {
            tracing::debug!("no pending call for {}", channel);
            return false;
        };

        let result = ExecuteResponse::decode(bytes)
            .map_err(IpcCallerError::Io)
            .and_then(|response| {
                IpcError::response_into_result(&call.method_id, response)
                    .map_err(IpcCallerError::Remote)
            });

        if let Err(err) = &result {
            tracing::debug!("{} settled with an error: {}", channel, err);
        }

        // The waiting future may already be gone.
        let _ = call.tx.send(result);
        true
    }

    fn handle_event(&self, bytes: &[u8]) -> bool {
        let event = match EventEmit::decode(bytes) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("discarding malformed event: {}", e);
                return false;
            }
        };

        let callbacks = self.lock_listeners().callbacks(&event.event_id);
        if callbacks.is_empty() {
            tracing::debug!("no listener for event {}", event.event_id);
            return false;
        }

        for callback in callbacks {
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| callback(&event.data)));
            if outcome.is_err() {
                tracing::warn!("listener for event {} panicked", event.event_id);
            }
        }
        true
    }

    /// Attaches `callback` to event `E`. Listeners stay attached until
    /// removed.
    pub fn on_remote_event<E, F>(&self, callback: F) -> ListenerId
    where
        E: IpcEvent + 'static,
        F: Fn(E::Data) + Send + Sync + 'static,
    {
        let wrapped = move |bytes: &[u8]| match E::decode_data(bytes) {
            Ok(data) => callback(data),
            Err(e) => tracing::warn!("could not decode event {}: {}", E::EVENT_ID, e),
        };
        self.lock_listeners().add(E::EVENT_ID, Arc::new(wrapped))
    }

    pub fn remove_remote_listener(&self, id: ListenerId) -> bool {
        self.lock_listeners().remove(id)
    }

    pub fn event_listener_count(&self, event_id: &str) -> usize {
        self.lock_listeners().count(event_id)
    }

    /// Number of calls still waiting for a response.
    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    pub fn is_pending(&self, message_id: u64) -> bool {
        self.lock_pending().contains(message_id)
    }

    /// The message id the next call will be tagged with.
    pub fn peek_next_message_id(&self) -> u64 {
        self.message_ids.peek()
    }

    /// Settles every outstanding call with [`IpcCallerError::Disconnected`].
    /// Later calls proceed normally.
    ///
    /// Returns how many calls were failed.
    pub fn fail_all_pending(&self, reason: &str) -> usize {
        let calls = self.lock_pending().drain();
        Self::disconnect(calls, reason)
    }

    /// Like [`IpcCaller::fail_all_pending`], but every later call also fails
    /// immediately with the same reason.
    pub fn close(&self, reason: &str) -> usize {
        let calls = self.lock_pending().close(reason);
        Self::disconnect(calls, reason)
    }

    pub fn is_closed(&self) -> bool {
        self.lock_pending().closed_reason().is_some()
    }

    fn disconnect(calls: Vec<PendingCall>, reason: &str) -> usize {
        let count = calls.len();

        if count > 0 {
            tracing::info!("failing {} pending call(s): {}", count, reason);
        }

        for call in calls {
            let _ = call
                .tx
                .send(Err(IpcCallerError::Disconnected(reason.to_string())));
        }
        count
    }

    fn lock_pending(&self) -> MutexGuard<'_, PendingCalls> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, EventListeners> {
        self.event_listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for IpcCaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpcCaller")
            .field("channels", &self.channels)
            .field("next_message_id", &self.message_ids.peek())
            .field("pending", &self.pending_count())
            .finish()
    }
}

struct PendingGuard<'a> {
    caller: &'a IpcCaller,
    message_id: u64,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.caller.lock_pending().remove(self.message_id) {
            tracing::debug!("abandoned call {}", self.message_id);
        }
    }
}
