use example_lab_bridge_service_definition::prebuffered::{
    CopyToClipboard, GetServerInfo, IsDarkTheme, SelectPythonPath, ValidatePythonPath,
};
use example_lab_bridge_service_definition::window_roles::{
    EXPOSURE_POLICY, LAB_WINDOW, PROGRESS_WINDOW, SETTINGS_WINDOW,
};
use lab_bridge_service::prebuffered::IpcMethodPrebuffered;

#[test]
fn progress_window_only_gets_common_queries() {
    assert_eq!(
        EXPOSURE_POLICY.exposed_methods(PROGRESS_WINDOW),
        vec!["get-app-config", "is-dark-theme", "set-log-level"]
    );
    assert!(!EXPOSURE_POLICY.allows(PROGRESS_WINDOW, SelectPythonPath::METHOD_ID));
}

#[test]
fn settings_window_adds_python_path_calls() {
    assert!(EXPOSURE_POLICY.allows(SETTINGS_WINDOW, SelectPythonPath::METHOD_ID));
    assert!(EXPOSURE_POLICY.allows(SETTINGS_WINDOW, ValidatePythonPath::METHOD_ID));
    assert!(EXPOSURE_POLICY.allows(SETTINGS_WINDOW, IsDarkTheme::METHOD_ID));
    assert!(!EXPOSURE_POLICY.allows(SETTINGS_WINDOW, CopyToClipboard::METHOD_ID));
}

#[test]
fn lab_window_cannot_pick_python_paths() {
    assert!(EXPOSURE_POLICY.allows(LAB_WINDOW, GetServerInfo::METHOD_ID));
    assert!(!EXPOSURE_POLICY.allows(LAB_WINDOW, SelectPythonPath::METHOD_ID));
    assert!(!EXPOSURE_POLICY.allows_sender(None, GetServerInfo::METHOD_ID));
}

#[test]
fn struct_payloads_round_trip_through_descriptors() {
    let info = example_lab_bridge_service_definition::prebuffered::ServerInfo {
        url: "http://localhost:8888".into(),
        token: "abc".into(),
        working_directory: "/home/user".into(),
        environment: None,
    };
    let bytes = GetServerInfo::encode_response(info.clone()).unwrap();
    assert_eq!(GetServerInfo::decode_response(&bytes).unwrap(), info);
}

#[test]
fn every_desktop_window_has_a_role() {
    let mut names: Vec<_> = EXPOSURE_POLICY.roles().map(|role| role.name()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![LAB_WINDOW.name(), PROGRESS_WINDOW.name(), SETTINGS_WINDOW.name()]
    );
}
