use bitcode::{Decode, Encode};

#[derive(Encode, Decode, PartialEq, Debug, Clone)]
pub struct ProgressUpdate {
    pub title: String,
    pub detail: String,
    pub show_animation: bool,
}

#[derive(Encode, Decode, PartialEq, Debug, Clone)]
pub struct InstallStatus {
    pub status: String,
    pub message: String,
}

bitcode_event!(ShowProgress, "show-progress", ProgressUpdate);

bitcode_event!(
    InstallBundledPythonEnvStatus,
    "install-bundled-python-env-status",
    InstallStatus
);
