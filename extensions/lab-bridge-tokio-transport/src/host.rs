use crate::{IpcMessage, WindowConnection, error::IpcTransportError};
use lab_bridge::SenderId;
use lab_bridge_service::{IpcEvent, RequestContext, WindowRole};
use lab_bridge_service_caller::IpcCaller;
use lab_bridge_service_endpoint::{
    IpcServiceEndpoint, IpcServiceEndpointInterface, emit_remote_event,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

/// The host's handle on one connected window.
struct WindowSlot {
    role: Option<WindowRole>,
    to_window: mpsc::UnboundedSender<IpcMessage>,
    /// Dropping this stops the window's request loop.
    _shutdown: oneshot::Sender<()>,
}

type WindowTable = Arc<Mutex<HashMap<SenderId, WindowSlot>>>;

/// The trusted process: one endpoint serving any number of windows.
///
/// Every window gets its own request loop, and every request its own task,
/// so a slow handler never holds up other requests.
pub struct IpcHost {
    endpoint: Arc<IpcServiceEndpoint>,
    windows: WindowTable,
    next_sender: AtomicU32,
}

impl IpcHost {
    pub fn new(endpoint: IpcServiceEndpoint) -> Self {
        Self::with_endpoint(Arc::new(endpoint))
    }

    pub fn with_endpoint(endpoint: Arc<IpcServiceEndpoint>) -> Self {
        Self {
            endpoint,
            windows: Arc::new(Mutex::new(HashMap::new())),
            next_sender: AtomicU32::new(1),
        }
    }

    /// Returns the shared endpoint, for registering handlers.
    pub fn endpoint(&self) -> Arc<IpcServiceEndpoint> {
        self.endpoint.clone()
    }

    /// Opens a new window and returns its end of the connection.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect_window(&self, role: Option<WindowRole>) -> WindowConnection {
        let sender = SenderId(self.next_sender.fetch_add(1, Ordering::Relaxed));
        let channels = self.endpoint.channels();

        let (to_host, from_window) = mpsc::unbounded_channel::<IpcMessage>();
        let (to_window, from_host) = mpsc::unbounded_channel::<IpcMessage>();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        lock(&self.windows).insert(
            sender,
            WindowSlot {
                role,
                to_window,
                _shutdown: shutdown_tx,
            },
        );

        tokio::spawn(Self::receiver_task(
            self.endpoint.clone(),
            self.windows.clone(),
            RequestContext::new(sender, role),
            from_window,
            shutdown_rx,
        ));

        let caller = IpcCaller::new(move |channel: &str, bytes: Vec<u8>| {
            if to_host.send((channel.to_string(), bytes)).is_err() {
                tracing::debug!(
                    "{} is disconnected; dropping message on {}",
                    sender,
                    channel
                );
            }
        })
        .with_channels(channels);

        tracing::info!(
            "{} connected with role {}",
            sender,
            role.map_or("<none>", |role| role.name())
        );

        WindowConnection::new(sender, role, Arc::new(caller), from_host)
    }

    /// Drops the host side of a window. Its outstanding calls fail with a
    /// disconnect and later calls fail immediately.
    pub fn close_window(&self, sender: SenderId) -> bool {
        let closed = lock(&self.windows).remove(&sender).is_some();
        if closed {
            tracing::info!("closed {}", sender);
        }
        closed
    }

    pub fn window_count(&self) -> usize {
        lock(&self.windows).len()
    }

    pub fn window_role(&self, sender: SenderId) -> Option<WindowRole> {
        lock(&self.windows).get(&sender).and_then(|slot| slot.role)
    }

    /// Connected windows, in connection order.
    pub fn windows(&self) -> Vec<SenderId> {
        let mut senders: Vec<_> = lock(&self.windows).keys().copied().collect();
        senders.sort_unstable();
        senders
    }

    /// Pushes event `E` to one window.
    pub fn emit_event<E: IpcEvent>(
        &self,
        sender: SenderId,
        data: E::Data,
    ) -> Result<(), IpcTransportError> {
        let to_window = lock(&self.windows)
            .get(&sender)
            .map(|slot| slot.to_window.clone())
            .ok_or(IpcTransportError::UnknownWindow(sender))?;

        let mut delivered = false;
        emit_remote_event::<E, _>(self.endpoint.channels(), data, |channel, bytes| {
            delivered = to_window.send((channel.to_string(), bytes)).is_ok();
        })?;

        if delivered {
            Ok(())
        } else {
            Err(IpcTransportError::WindowClosed(sender))
        }
    }

    /// Pushes event `E` to every connected window. Returns how many windows
    /// it was delivered to.
    pub fn broadcast_event<E>(&self, data: E::Data) -> Result<usize, IpcTransportError>
    where
        E: IpcEvent,
        E::Data: Clone,
    {
        let mut delivered = 0;
        for sender in self.windows() {
            match self.emit_event::<E>(sender, data.clone()) {
                Ok(()) => delivered += 1,
                Err(IpcTransportError::UnknownWindow(_) | IpcTransportError::WindowClosed(_)) => {}
                Err(e) => return Err(e),
            }
        }

        tracing::trace!("broadcast {} to {} window(s)", E::EVENT_ID, delivered);
        Ok(delivered)
    }

    /// Serves one window's requests until it disconnects or is closed.
    async fn receiver_task(
        endpoint: Arc<IpcServiceEndpoint>,
        windows: WindowTable,
        context: RequestContext,
        mut from_window: mpsc::UnboundedReceiver<IpcMessage>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        let sender = context.sender;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::debug!("{} request loop stopped by host", sender);
                    break;
                }

                message = from_window.recv() => {
                    let Some((channel, bytes)) = message else {
                        tracing::info!("{} disconnected", sender);
                        break;
                    };

                    tokio::spawn(Self::handle_request(
                        endpoint.clone(),
                        windows.clone(),
                        context,
                        channel,
                        bytes,
                    ));
                }
            }
        }

        lock(&windows).remove(&sender);
        tracing::info!("terminated connection for {}", sender);
    }

    async fn handle_request(
        endpoint: Arc<IpcServiceEndpoint>,
        windows: WindowTable,
        context: RequestContext,
        channel: String,
        bytes: Vec<u8>,
    ) {
        let sender = context.sender;

        // Looked up at reply time: the window may have closed meanwhile.
        let on_emit = |response_channel: &str, response: Vec<u8>| {
            let to_window = lock(&windows)
                .get(&sender)
                .map(|slot| slot.to_window.clone());

            match to_window {
                Some(to_window) => {
                    let _ = to_window.send((response_channel.to_string(), response));
                }
                None => {
                    tracing::debug!("{} closed before {} was answered", sender, response_channel)
                }
            }
        };

        if let Err(err) = endpoint.read_bytes(context, &channel, &bytes, on_emit).await {
            tracing::error!("error processing message from {}: {}", sender, err);
        }
    }
}

fn lock(
    windows: &Mutex<HashMap<SenderId, WindowSlot>>,
) -> MutexGuard<'_, HashMap<SenderId, WindowSlot>> {
    windows.lock().unwrap_or_else(PoisonError::into_inner)
}
