use crate::prebuffered::{
    CopyToClipboard, Echo, GetAppConfig, GetServerInfo, IsDarkTheme, SelectPythonPath,
    SetLogLevel, SetRemoteServerUrl, ValidatePythonPath,
};
use lab_bridge_service::{ExposurePolicy, WindowRole, prebuffered::IpcMethodPrebuffered};
use once_cell::sync::Lazy;

pub const PROGRESS_WINDOW: WindowRole = WindowRole("progress");
pub const SETTINGS_WINDOW: WindowRole = WindowRole("settings");
pub const LAB_WINDOW: WindowRole = WindowRole("lab");

/// Theme and config queries every window gets.
const COMMON_METHODS: &[&str] = &[
    IsDarkTheme::METHOD_ID,
    GetAppConfig::METHOD_ID,
    SetLogLevel::METHOD_ID,
];

/// The desktop shell's role table.
pub static EXPOSURE_POLICY: Lazy<ExposurePolicy> = Lazy::new(|| {
    ExposurePolicy::new()
        .expose_all(PROGRESS_WINDOW, COMMON_METHODS)
        .expose_all(SETTINGS_WINDOW, COMMON_METHODS)
        .expose::<SelectPythonPath>(SETTINGS_WINDOW)
        .expose::<ValidatePythonPath>(SETTINGS_WINDOW)
        .expose_all(LAB_WINDOW, COMMON_METHODS)
        .expose::<Echo>(LAB_WINDOW)
        .expose::<GetServerInfo>(LAB_WINDOW)
        .expose::<SetRemoteServerUrl>(LAB_WINDOW)
        .expose::<CopyToClipboard>(LAB_WINDOW)
});
