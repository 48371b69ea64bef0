use super::IpcServiceEndpointInterface;
use lab_bridge::channel::ProtocolChannels;
use lab_bridge_service::{ExposurePolicy, RequestContext};
use std::collections::HashMap;
use std::{future::Future, pin::Pin, sync::Arc};

// --- Conditionally Alias the Mutex Implementation ---
#[cfg(not(feature = "tokio_support"))]
use std::sync::Mutex;
#[cfg(feature = "tokio_support")]
use tokio::sync::Mutex;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type IpcPrebufferedHandler = Arc<
    dyn Fn(
            RequestContext,
            Vec<u8>,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, BoxError>> + Send>>
        + Send
        + Sync,
>;

/// The trusted-process half of the bridge.
///
/// Construct one per process role and share it by `Arc` with whatever
/// registers methods and whatever feeds it requests.
pub struct IpcServiceEndpoint {
    prebuffered_handlers: Arc<Mutex<HashMap<String, IpcPrebufferedHandler>>>,
    exposure_policy: Option<Arc<ExposurePolicy>>,
    channels: ProtocolChannels,
}

impl Default for IpcServiceEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl IpcServiceEndpoint {
    /// An endpoint on the default channel set that authorizes nothing:
    /// every window may call every registered method.
    pub fn new() -> Self {
        Self {
            prebuffered_handlers: Arc::new(Mutex::new(HashMap::new())),
            exposure_policy: None,
            channels: ProtocolChannels::default(),
        }
    }

    pub fn with_channels(mut self, channels: ProtocolChannels) -> Self {
        self.channels = channels;
        self
    }

    /// Authorizes every request against `policy` using the sender's role.
    pub fn with_exposure_policy(mut self, policy: impl Into<Arc<ExposurePolicy>>) -> Self {
        self.exposure_policy = Some(policy.into());
        self
    }
}

#[async_trait::async_trait]
impl IpcServiceEndpointInterface for IpcServiceEndpoint {
    type HandlersLock = Mutex<HashMap<String, IpcPrebufferedHandler>>;

    fn get_prebuffered_handlers(&self) -> Arc<Self::HandlersLock> {
        self.prebuffered_handlers.clone()
    }

    fn exposure_policy(&self) -> Option<&ExposurePolicy> {
        self.exposure_policy.as_deref()
    }

    fn channels(&self) -> ProtocolChannels {
        self.channels
    }
}
