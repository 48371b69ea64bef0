use crate::{IpcCaller, RemoteMethod, error::IpcCallerError};
use lab_bridge_service::{ExposurePolicy, WindowRole, prebuffered::IpcMethodPrebuffered};
use std::sync::Arc;

/// The set of remote methods one window is handed, chosen by its role.
///
/// Methods outside the role are never constructed, so a window cannot even
/// attempt them through this API.
#[derive(Debug, Clone)]
pub struct ExposedApi {
    caller: Arc<IpcCaller>,
    role: WindowRole,
    policy: Arc<ExposurePolicy>,
}

impl ExposedApi {
    pub fn new(
        caller: Arc<IpcCaller>,
        role: WindowRole,
        policy: impl Into<Arc<ExposurePolicy>>,
    ) -> Self {
        Self {
            caller,
            role,
            policy: policy.into(),
        }
    }

    pub fn role(&self) -> WindowRole {
        self.role
    }

    pub fn caller(&self) -> &Arc<IpcCaller> {
        &self.caller
    }

    /// The wrapper for `M`, or [`IpcCallerError::NotExposed`] if this role
    /// may not call it.
    pub fn method<M: IpcMethodPrebuffered>(&self) -> Result<RemoteMethod<M>, IpcCallerError> {
        if !self.policy.allows(self.role, M::METHOD_ID) {
            return Err(IpcCallerError::NotExposed {
                method_id: M::METHOD_ID,
                role: self.role,
            });
        }
        Ok(self.caller.create_remote_method::<M>())
    }

    pub fn exposed_methods(&self) -> Vec<&'static str> {
        self.policy.exposed_methods(self.role)
    }
}
