use bitcode::{Decode, Encode};

/// Connection details of the notebook server a lab window talks to.
#[derive(Encode, Decode, PartialEq, Debug, Clone, Default)]
pub struct ServerInfo {
    pub url: String,
    pub token: String,
    pub working_directory: String,
    pub environment: Option<String>,
}

bitcode_method!(
    /// Reports the server backing the calling lab window.
    GetServerInfo, "get-server-info", () => ServerInfo
);

bitcode_method!(
    /// Points the session at a remote server instead of a local one.
    SetRemoteServerUrl, "set-remote-server-url", String => ()
);
