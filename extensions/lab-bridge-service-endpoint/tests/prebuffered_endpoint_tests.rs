use example_lab_bridge_service_definition::events::{ProgressUpdate, ShowProgress};
use example_lab_bridge_service_definition::prebuffered::{Echo, SelectPythonPath};
use example_lab_bridge_service_definition::window_roles::{
    EXPOSURE_POLICY, LAB_WINDOW, PROGRESS_WINDOW, SETTINGS_WINDOW,
};
use lab_bridge::SenderId;
use lab_bridge::channel::ProtocolChannels;
use lab_bridge::envelope::{EventEmit, ExecuteRequest, ExecuteResponse};
use lab_bridge_service::prebuffered::IpcMethodPrebuffered;
use lab_bridge_service::{
    HandlerPayloadError, IpcError, IpcErrorKind, IpcEvent, IpcResultStatus, RequestContext,
};
use lab_bridge_service_endpoint::{
    BoxError, IpcServiceEndpoint, IpcServiceEndpointInterface, emit_remote_event,
    error::IpcServiceEndpointError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Emitted = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

fn lab_context() -> RequestContext {
    RequestContext::new(SenderId(1), Some(LAB_WINDOW))
}

/// Feeds one request through `read_bytes` and returns everything emitted.
async fn perform_request(
    endpoint: &IpcServiceEndpoint,
    context: RequestContext,
    message_id: u64,
    method_id: &str,
    arg: Vec<u8>,
) -> Vec<(String, ExecuteResponse)> {
    let emitted: Emitted = Arc::new(Mutex::new(Vec::new()));
    let request = ExecuteRequest::new(message_id, method_id, arg);

    endpoint
        .read_bytes(
            context,
            ProtocolChannels::default().request,
            &request.encode(),
            {
                let emitted = emitted.clone();
                move |channel: &str, bytes: Vec<u8>| {
                    emitted.lock().unwrap().push((channel.to_string(), bytes));
                }
            },
        )
        .await
        .unwrap();

    let emitted = emitted.lock().unwrap().clone();
    emitted
        .into_iter()
        .map(|(channel, bytes)| (channel, ExecuteResponse::decode(&bytes).unwrap()))
        .collect()
}

/// Asserts exactly one response was emitted on the expected channel and
/// returns it as the tagged result.
fn single_result(
    emitted: Vec<(String, ExecuteResponse)>,
    method_id: &str,
    message_id: u64,
) -> Result<Vec<u8>, IpcError> {
    assert_eq!(emitted.len(), 1, "expected exactly one response");
    let (channel, response) = emitted.into_iter().next().unwrap();
    assert_eq!(channel, format!("{method_id}-{message_id}"));
    IpcError::response_into_result(method_id, response)
}

#[tokio::test]
async fn test_handler_registration() {
    let endpoint = IpcServiceEndpoint::new();
    let result1 = endpoint
        .register_prebuffered("dup", |_, _: Vec<u8>| async { Ok(vec![]) })
        .await;
    assert!(result1.is_ok());

    let result2 = endpoint
        .register_prebuffered("dup", |_, _: Vec<u8>| async { Ok(vec![1]) })
        .await;
    assert!(matches!(
        result2,
        Err(IpcServiceEndpointError::DuplicateMethod(ref id)) if id == "dup"
    ));

    // The first handler is still the one answering.
    let emitted = perform_request(&endpoint, lab_context(), 0, "dup", vec![]).await;
    assert_eq!(single_result(emitted, "dup", 0).unwrap(), Vec::<u8>::new());
}

#[tokio::test]
async fn test_echo_then_missing() {
    let endpoint = IpcServiceEndpoint::new();
    endpoint
        .register_method::<Echo, _, _>(|_, input: String| async move { Ok(input) })
        .await
        .unwrap();

    let arg = Echo::encode_request("hello".into()).unwrap();
    let emitted = perform_request(&endpoint, lab_context(), 0, Echo::METHOD_ID, arg).await;
    let bytes = single_result(emitted, Echo::METHOD_ID, 0).unwrap();
    assert_eq!(Echo::decode_response(&bytes).unwrap(), "hello");

    let emitted = perform_request(&endpoint, lab_context(), 1, "missing", vec![1]).await;
    let err = single_result(emitted, "missing", 1).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::MethodNotFound);
    assert!(err.message.contains("missing"));
    assert!(err.payload.is_none());
}

#[tokio::test]
async fn test_handler_rejection_carries_message() {
    let endpoint = IpcServiceEndpoint::new();
    endpoint
        .register_prebuffered("boom", |_, _: Vec<u8>| async {
            Err::<Vec<u8>, BoxError>("fail".into())
        })
        .await
        .unwrap();

    let emitted = perform_request(&endpoint, lab_context(), 4, "boom", vec![]).await;
    let err = single_result(emitted, "boom", 4).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::HandlerFailed);
    assert_eq!(err.message, "fail");
}

#[tokio::test]
async fn test_handler_payload_error_is_forwarded_raw() {
    let endpoint = IpcServiceEndpoint::new();
    let error_payload = b"INVALID_ARGUMENT".to_vec();

    endpoint
        .register_prebuffered("validate", {
            let error_payload = error_payload.clone();
            move |_, _: Vec<u8>| {
                let error_payload = error_payload.clone();
                async move { Err(Box::new(HandlerPayloadError(error_payload)) as BoxError) }
            }
        })
        .await
        .unwrap();

    let emitted = perform_request(&endpoint, lab_context(), 0, "validate", vec![]).await;
    assert_eq!(emitted[0].1.status, u8::from(IpcResultStatus::Fail));

    let err = single_result(emitted, "validate", 0).unwrap_err();
    assert_eq!(err.payload, Some(error_payload));
}

#[tokio::test]
async fn test_panicking_handlers_still_answer_once() {
    let endpoint = IpcServiceEndpoint::new();
    endpoint
        .register_prebuffered(
            "sync-panic",
            |_, _: Vec<u8>| -> std::future::Ready<Result<Vec<u8>, BoxError>> {
                panic!("sync boom")
            },
        )
        .await
        .unwrap();
    endpoint
        .register_prebuffered("async-panic", |_, _: Vec<u8>| async move {
            let empty: Vec<u8> = Vec::new();
            Ok::<Vec<u8>, BoxError>(vec![empty[0]])
        })
        .await
        .unwrap();

    let emitted = perform_request(&endpoint, lab_context(), 0, "sync-panic", vec![]).await;
    let err = single_result(emitted, "sync-panic", 0).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::SystemError);
    assert!(err.message.contains("sync boom"));

    let emitted = perform_request(&endpoint, lab_context(), 1, "async-panic", vec![]).await;
    let err = single_result(emitted, "async-panic", 1).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::SystemError);
}

#[tokio::test]
async fn test_undecodable_argument_is_a_handler_failure() {
    let endpoint = IpcServiceEndpoint::new();
    endpoint
        .register_method::<Echo, _, _>(|_, input: String| async move { Ok(input) })
        .await
        .unwrap();

    // Not UTF-8, so `Echo` cannot decode it.
    let emitted = perform_request(
        &endpoint,
        lab_context(),
        0,
        Echo::METHOD_ID,
        vec![0xff, 0xfe],
    )
    .await;
    let err = single_result(emitted, Echo::METHOD_ID, 0).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::HandlerFailed);
}

#[tokio::test]
async fn test_exposure_policy_authorizes_by_role() {
    let endpoint = IpcServiceEndpoint::new().with_exposure_policy(EXPOSURE_POLICY.clone());
    endpoint
        .register_method::<SelectPythonPath, _, _>(|_, ()| async move {
            Ok(Some("/usr/bin/python3".to_string()))
        })
        .await
        .unwrap();

    let arg = SelectPythonPath::encode_request(()).unwrap();

    let settings = RequestContext::new(SenderId(2), Some(SETTINGS_WINDOW));
    let emitted =
        perform_request(&endpoint, settings, 0, SelectPythonPath::METHOD_ID, arg.clone()).await;
    let bytes = single_result(emitted, SelectPythonPath::METHOD_ID, 0).unwrap();
    assert_eq!(
        SelectPythonPath::decode_response(&bytes).unwrap().as_deref(),
        Some("/usr/bin/python3")
    );

    let progress = RequestContext::new(SenderId(3), Some(PROGRESS_WINDOW));
    let emitted =
        perform_request(&endpoint, progress, 1, SelectPythonPath::METHOD_ID, arg.clone()).await;
    let err = single_result(emitted, SelectPythonPath::METHOD_ID, 1).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::Unauthorized);
    assert!(err.message.contains("progress"));

    let anonymous = RequestContext::new(SenderId(4), None);
    let emitted = perform_request(&endpoint, anonymous, 2, SelectPythonPath::METHOD_ID, arg).await;
    let err = single_result(emitted, SelectPythonPath::METHOD_ID, 2).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_handlers_receive_the_sender() {
    let endpoint = IpcServiceEndpoint::new();
    endpoint
        .register_prebuffered("whoami", |ctx: RequestContext, _: Vec<u8>| async move {
            Ok(ctx.sender.to_string().into_bytes())
        })
        .await
        .unwrap();

    let context = RequestContext::new(SenderId(9), None);
    let emitted = perform_request(&endpoint, context, 0, "whoami", vec![]).await;
    assert_eq!(single_result(emitted, "whoami", 0).unwrap(), b"window#9");
}

#[tokio::test]
async fn test_unanswerable_bytes_emit_nothing() {
    let endpoint = IpcServiceEndpoint::new();
    let emitted: Emitted = Arc::new(Mutex::new(Vec::new()));
    let on_emit = {
        let emitted = emitted.clone();
        move |channel: &str, bytes: Vec<u8>| {
            emitted.lock().unwrap().push((channel.to_string(), bytes));
        }
    };

    let request = ExecuteRequest::new(0, "echo", vec![]).encode();
    let result = endpoint
        .read_bytes(lab_context(), "echo-0", &request, on_emit.clone())
        .await;
    assert!(matches!(
        result,
        Err(IpcServiceEndpointError::UnexpectedChannel(_))
    ));

    let result = endpoint
        .read_bytes(
            lab_context(),
            ProtocolChannels::default().request,
            &[],
            on_emit,
        )
        .await;
    assert!(matches!(result, Err(IpcServiceEndpointError::Decode(_))));

    assert!(emitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_requests_before_registration_are_answered() {
    let endpoint = IpcServiceEndpoint::new();
    let arg = Echo::encode_request("early".into()).unwrap();

    let emitted = perform_request(&endpoint, lab_context(), 0, Echo::METHOD_ID, arg.clone()).await;
    let err = single_result(emitted, Echo::METHOD_ID, 0).unwrap_err();
    assert_eq!(err.kind, IpcErrorKind::MethodNotFound);
    assert!(!endpoint.is_method_registered(Echo::METHOD_ID).await);

    endpoint
        .register_method::<Echo, _, _>(|_, input: String| async move { Ok(input) })
        .await
        .unwrap();
    assert!(endpoint.is_method_registered(Echo::METHOD_ID).await);

    let emitted = perform_request(&endpoint, lab_context(), 1, Echo::METHOD_ID, arg).await;
    assert!(single_result(emitted, Echo::METHOD_ID, 1).is_ok());
}

#[tokio::test]
async fn test_concurrent_dispatch_completes_out_of_order() {
    let endpoint = Arc::new(IpcServiceEndpoint::new());
    let completed = Arc::new(Mutex::new(Vec::new()));

    endpoint
        .register_prebuffered("sleep", {
            let completed = completed.clone();
            move |_, bytes: Vec<u8>| {
                let completed = completed.clone();
                async move {
                    let millis = u64::from(bytes[0]);
                    tokio::time::sleep(Duration::from_millis(millis)).await;
                    completed.lock().unwrap().push(millis);
                    Ok(bytes)
                }
            }
        })
        .await
        .unwrap();

    let slow = ExecuteRequest::new(0, "sleep", vec![100]);
    let fast = ExecuteRequest::new(1, "sleep", vec![10]);

    let ((slow_channel, slow_resp), (fast_channel, fast_resp)) = tokio::join!(
        endpoint.dispatch(lab_context(), slow),
        endpoint.dispatch(lab_context(), fast),
    );

    assert_eq!(*completed.lock().unwrap(), vec![10, 100]);
    assert_eq!(slow_channel, "sleep-0");
    assert_eq!(slow_resp.resp, Some(vec![100]));
    assert_eq!(fast_channel, "sleep-1");
    assert_eq!(fast_resp.resp, Some(vec![10]));
}

#[test]
fn test_emit_remote_event_uses_event_channel() {
    let mut sent = None;
    let update = ProgressUpdate {
        title: "Installing".into(),
        detail: "Python environment".into(),
        show_animation: true,
    };

    emit_remote_event::<ShowProgress, _>(
        ProtocolChannels::ASYNC_REMOTE,
        update.clone(),
        |channel, bytes| sent = Some((channel.to_string(), bytes)),
    )
    .unwrap();

    let (channel, bytes) = sent.unwrap();
    assert_eq!(channel, "async-remote:emit-event");

    let envelope = EventEmit::decode(&bytes).unwrap();
    assert_eq!(envelope.event_id, ShowProgress::EVENT_ID);
    assert_eq!(ShowProgress::decode_data(&envelope.data).unwrap(), update);
}
