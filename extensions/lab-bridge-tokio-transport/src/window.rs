use crate::IpcMessage;
use lab_bridge::SenderId;
use lab_bridge_service::{ExposurePolicy, WindowRole};
use lab_bridge_service_caller::{ExposedApi, IpcCaller};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

/// The untrusted end of one window's connection.
///
/// Dropping every handle to the caller disconnects the window from the host.
#[derive(Debug, Clone)]
pub struct WindowConnection {
    sender: SenderId,
    role: Option<WindowRole>,
    caller: Arc<IpcCaller>,
}

impl WindowConnection {
    pub(crate) fn new(
        sender: SenderId,
        role: Option<WindowRole>,
        caller: Arc<IpcCaller>,
        inbound: mpsc::UnboundedReceiver<IpcMessage>,
    ) -> Self {
        tokio::spawn(Self::receiver_task(
            sender,
            Arc::downgrade(&caller),
            inbound,
        ));

        Self {
            sender,
            role,
            caller,
        }
    }

    pub fn sender(&self) -> SenderId {
        self.sender
    }

    pub fn role(&self) -> Option<WindowRole> {
        self.role
    }

    pub fn caller(&self) -> &Arc<IpcCaller> {
        &self.caller
    }

    /// The remote methods this window's role may use. `None` for a window
    /// connected without a role.
    pub fn exposed_api(&self, policy: impl Into<Arc<ExposurePolicy>>) -> Option<ExposedApi> {
        self.role
            .map(|role| ExposedApi::new(Arc::clone(&self.caller), role, policy))
    }

    /// Routes everything the host sends to this window into the caller.
    ///
    /// However the loop ends, the caller is closed so that nothing waits on a
    /// response that can no longer arrive.
    async fn receiver_task(
        sender: SenderId,
        caller: Weak<IpcCaller>,
        mut inbound: mpsc::UnboundedReceiver<IpcMessage>,
    ) {
        let _close_on_exit = CloseOnExit {
            sender,
            caller: caller.clone(),
        };

        while let Some((channel, bytes)) = inbound.recv().await {
            let Some(caller) = caller.upgrade() else {
                break;
            };
            if !caller.handle_inbound(&channel, &bytes) {
                tracing::trace!("{} dropped message on {}", sender, channel);
            }
        }
    }
}

/// Closes the caller when the receive task finishes or unwinds.
struct CloseOnExit {
    sender: SenderId,
    caller: Weak<IpcCaller>,
}

impl Drop for CloseOnExit {
    fn drop(&mut self) {
        if let Some(caller) = self.caller.upgrade() {
            caller.close(&format!("{} was closed", self.sender));
        }
        tracing::debug!("{} receive loop ended", self.sender);
    }
}
