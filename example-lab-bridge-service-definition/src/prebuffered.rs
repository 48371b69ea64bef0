mod desktop;
mod echo;
mod python;
mod server;

pub use desktop::{AppConfig, CopyToClipboard, GetAppConfig, IsDarkTheme, SetLogLevel};
pub use echo::Echo;
pub use python::{PythonPathValidation, SelectPythonPath, ValidatePythonPath};
pub use server::{GetServerInfo, ServerInfo, SetRemoteServerUrl};
