use crate::prebuffered::IpcMethodPrebuffered;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// The role a native window plays, e.g. the progress view or the settings
/// dialog. Roles decide which methods a window may call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WindowRole(pub &'static str);

impl WindowRole {
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for WindowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Which methods each window role may invoke.
///
/// The caller side uses it to hand a window only the wrappers for its role;
/// an endpoint configured with one also authorizes every request by the
/// sender's role.
#[derive(Debug, Clone, Default)]
pub struct ExposurePolicy {
    roles: HashMap<WindowRole, HashSet<&'static str>>,
}

impl ExposurePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposes method `M` to `role`.
    pub fn expose<M: IpcMethodPrebuffered>(self, role: WindowRole) -> Self {
        self.expose_id(role, M::METHOD_ID)
    }

    pub fn expose_id(mut self, role: WindowRole, method_id: &'static str) -> Self {
        self.roles.entry(role).or_default().insert(method_id);
        self
    }

    /// Exposes every id in `method_ids` to `role`.
    pub fn expose_all(mut self, role: WindowRole, method_ids: &[&'static str]) -> Self {
        self.roles
            .entry(role)
            .or_default()
            .extend(method_ids.iter().copied());
        self
    }

    pub fn allows(&self, role: WindowRole, method_id: &str) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|methods| methods.contains(method_id))
    }

    /// Like [`ExposurePolicy::allows`], but a missing role is always denied.
    pub fn allows_sender(&self, role: Option<WindowRole>, method_id: &str) -> bool {
        role.is_some_and(|role| self.allows(role, method_id))
    }

    /// The methods exposed to `role`, sorted.
    pub fn exposed_methods(&self, role: WindowRole) -> Vec<&'static str> {
        let mut methods: Vec<_> = self
            .roles
            .get(&role)
            .map(|methods| methods.iter().copied().collect())
            .unwrap_or_default();
        methods.sort_unstable();
        methods
    }

    pub fn roles(&self) -> impl Iterator<Item = WindowRole> + '_ {
        self.roles.keys().copied()
    }
}
