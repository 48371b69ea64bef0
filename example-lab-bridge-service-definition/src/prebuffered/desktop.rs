use bitcode::{Decode, Encode};

#[derive(Encode, Decode, PartialEq, Debug, Clone)]
pub struct AppConfig {
    pub platform: String,
}

bitcode_method!(CopyToClipboard, "copy-to-clipboard", String => ());

bitcode_method!(IsDarkTheme, "is-dark-theme", () => bool);

bitcode_method!(GetAppConfig, "get-app-config", () => AppConfig);

bitcode_method!(
    /// Accepts `error`, `warn`, `info`, `debug` or `trace`.
    SetLogLevel, "set-log-level", String => ()
);
