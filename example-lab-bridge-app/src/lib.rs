//! The desktop shell's side of the bridge: the state its methods operate on
//! and the handlers that expose that state to windows.

use example_lab_bridge_service_definition::{
    prebuffered::{
        AppConfig, CopyToClipboard, Echo, GetAppConfig, GetServerInfo, IsDarkTheme,
        PythonPathValidation, SelectPythonPath, ServerInfo, SetLogLevel, SetRemoteServerUrl,
        ValidatePythonPath,
    },
    window_roles::EXPOSURE_POLICY,
};
use lab_bridge_service_endpoint::{
    BoxError, IpcServiceEndpoint, IpcServiceEndpointInterface, error::IpcServiceEndpointError,
};
use lab_bridge_tokio_transport::IpcHost;
use std::sync::{Arc, Mutex, PoisonError};

pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Application state the exposed methods read and write.
#[derive(Debug)]
pub struct DesktopState {
    server_info: Mutex<ServerInfo>,
    python_path: Mutex<Option<String>>,
    clipboard: Mutex<Option<String>>,
    log_level: Mutex<String>,
    dark_theme: bool,
}

impl DesktopState {
    pub fn new(server_info: ServerInfo, dark_theme: bool) -> Self {
        Self {
            server_info: Mutex::new(server_info),
            python_path: Mutex::new(None),
            clipboard: Mutex::new(None),
            log_level: Mutex::new("info".to_string()),
            dark_theme,
        }
    }

    pub fn with_python_path(self, path: impl Into<String>) -> Self {
        *locked(&self.python_path) = Some(path.into());
        self
    }

    pub fn server_info(&self) -> ServerInfo {
        locked(&self.server_info).clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        locked(&self.clipboard).clone()
    }

    pub fn log_level(&self) -> String {
        locked(&self.log_level).clone()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Accepts interpreters named like `python`, `python3` or `python3.12`.
pub fn validate_python_path(path: &str) -> PythonPathValidation {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or_default();

    if path.trim().is_empty() {
        PythonPathValidation {
            valid: false,
            message: Some("No path given.".to_string()),
        }
    } else if !file_name.starts_with("python") {
        PythonPathValidation {
            valid: false,
            message: Some(format!("{file_name} is not a Python executable.")),
        }
    } else {
        PythonPathValidation {
            valid: true,
            message: None,
        }
    }
}

/// Registers every desktop method on `endpoint`.
pub async fn register_desktop_handlers(
    endpoint: &IpcServiceEndpoint,
    state: Arc<DesktopState>,
) -> Result<(), IpcServiceEndpointError> {
    endpoint
        .register_method::<Echo, _, _>(|_, input: String| async move { Ok(input) })
        .await?;

    endpoint
        .register_method::<GetServerInfo, _, _>({
            let state = state.clone();
            move |_, ()| {
                let info = state.server_info();
                async move { Ok(info) }
            }
        })
        .await?;

    endpoint
        .register_method::<SetRemoteServerUrl, _, _>({
            let state = state.clone();
            move |ctx, url: String| {
                let state = state.clone();
                async move {
                    if !(url.starts_with("http://") || url.starts_with("https://")) {
                        let err: BoxError = format!("invalid server url: {url}").into();
                        return Err(err);
                    }
                    tracing::info!("{} switched the server to {}", ctx.sender, url);
                    locked(&state.server_info).url = url;
                    Ok(())
                }
            }
        })
        .await?;

    endpoint
        .register_method::<SelectPythonPath, _, _>({
            let state = state.clone();
            move |_, ()| {
                let path = locked(&state.python_path).clone();
                async move { Ok(path) }
            }
        })
        .await?;

    endpoint
        .register_method::<ValidatePythonPath, _, _>(|_, path: String| async move {
            Ok(validate_python_path(&path))
        })
        .await?;

    endpoint
        .register_method::<CopyToClipboard, _, _>({
            let state = state.clone();
            move |_, text: String| {
                *locked(&state.clipboard) = Some(text);
                async { Ok(()) }
            }
        })
        .await?;

    endpoint
        .register_method::<IsDarkTheme, _, _>({
            let dark_theme = state.dark_theme;
            move |_, ()| async move { Ok(dark_theme) }
        })
        .await?;

    endpoint
        .register_method::<GetAppConfig, _, _>(|_, ()| async {
            Ok(AppConfig {
                platform: std::env::consts::OS.to_string(),
            })
        })
        .await?;

    endpoint
        .register_method::<SetLogLevel, _, _>({
            let state = state.clone();
            move |_, level: String| {
                let state = state.clone();
                async move {
                    let level = level.to_ascii_lowercase();
                    if !LOG_LEVELS.contains(&level.as_str()) {
                        let err: BoxError = format!("unknown log level: {level}").into();
                        return Err(err);
                    }
                    *locked(&state.log_level) = level;
                    Ok(())
                }
            }
        })
        .await?;

    Ok(())
}

/// A host serving the desktop methods, authorized by window role.
pub async fn desktop_host(state: Arc<DesktopState>) -> Result<IpcHost, IpcServiceEndpointError> {
    let endpoint = IpcServiceEndpoint::new().with_exposure_policy(EXPOSURE_POLICY.clone());
    register_desktop_handlers(&endpoint, state).await?;
    Ok(IpcHost::new(endpoint))
}
