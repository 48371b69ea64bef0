use example_lab_bridge_app::{DesktopState, desktop_host};
use example_lab_bridge_service_definition::{
    events::{ProgressUpdate, ShowProgress},
    prebuffered::{CopyToClipboard, GetServerInfo, IsDarkTheme, ServerInfo, ValidatePythonPath},
    window_roles::{EXPOSURE_POLICY, LAB_WINDOW, PROGRESS_WINDOW, SETTINGS_WINDOW},
};
use lab_bridge_service_caller::prebuffered::IpcCallPrebuffered;
use std::sync::Arc;
use tokio::join;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // LAB_BRIDGE_LOG takes an env-filter directive, e.g. `lab_bridge=debug`.
    let filter =
        EnvFilter::try_from_env("LAB_BRIDGE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let state = Arc::new(
        DesktopState::new(
            ServerInfo {
                url: "http://localhost:8888/lab".to_string(),
                token: "c0ffee".to_string(),
                working_directory: std::env::current_dir()?.display().to_string(),
                environment: None,
            },
            true,
        )
        .with_python_path("/usr/bin/python3"),
    );
    let host = desktop_host(state.clone()).await?;

    let progress = host.connect_window(Some(PROGRESS_WINDOW));
    let settings = host.connect_window(Some(SETTINGS_WINDOW));
    let lab = host.connect_window(Some(LAB_WINDOW));

    progress
        .caller()
        .on_remote_event::<ShowProgress, _>(|update: ProgressUpdate| {
            println!("progress window: {} ({})", update.title, update.detail);
        });
    host.emit_event::<ShowProgress>(
        progress.sender(),
        ProgressUpdate {
            title: "Starting JupyterLab".to_string(),
            detail: "launching server".to_string(),
            show_animation: true,
        },
    )?;

    // `join!` will await all responses before proceeding
    let (info, dark, validation) = join!(
        GetServerInfo::call(lab.caller(), ()),
        IsDarkTheme::call(progress.caller(), ()),
        ValidatePythonPath::call(settings.caller(), "/usr/bin/python3".to_string()),
    );
    println!("Server info for the lab window: {:?}", info);
    println!("Dark theme: {:?}", dark);
    println!("Python path validation: {:?}", validation);

    if let Some(api) = lab.exposed_api(EXPOSURE_POLICY.clone()) {
        api.method::<CopyToClipboard>()?
            .call("print('hello')".to_string())
            .await?;
        println!("Clipboard now holds: {:?}", state.clipboard());
    }

    // The progress window may not ask for server details.
    let denied = GetServerInfo::call(progress.caller(), ()).await;
    println!("Server info for the progress window: {:?}", denied);

    host.close_window(progress.sender());
    let closed = IsDarkTheme::call(progress.caller(), ()).await;
    println!("After closing the progress window: {:?}", closed);

    Ok(())
}
