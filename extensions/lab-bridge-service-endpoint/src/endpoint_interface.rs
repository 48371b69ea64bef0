use super::{
    endpoint::{BoxError, IpcPrebufferedHandler},
    error::IpcServiceEndpointError,
    with_handlers_trait::WithHandlers,
};
use futures::FutureExt;
use lab_bridge::{
    channel::ProtocolChannels,
    envelope::{ExecuteRequest, ExecuteResponse},
};
use lab_bridge_service::{
    ExposurePolicy, HandlerPayloadError, IpcError, IpcErrorKind, RequestContext,
    prebuffered::IpcMethodPrebuffered,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::{collections::hash_map::Entry, future::Future, marker::Send, sync::Arc};

#[async_trait::async_trait]
pub trait IpcServiceEndpointInterface: Send + Sync {
    type HandlersLock: WithHandlers;

    fn get_prebuffered_handlers(&self) -> Arc<Self::HandlersLock>;

    /// When `Some`, every request is authorized by the sender's role.
    fn exposure_policy(&self) -> Option<&ExposurePolicy>;

    fn channels(&self) -> ProtocolChannels;

    /// Registers a raw handler under `method_id`.
    ///
    /// A second registration under the same id is rejected; the first
    /// handler stays in place.
    async fn register_prebuffered<F, Fut>(
        &self,
        method_id: &str,
        handler: F,
    ) -> Result<(), IpcServiceEndpointError>
    where
        F: Fn(RequestContext, Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, BoxError>> + Send + 'static,
    {
        let method_id = method_id.to_string();
        self.get_prebuffered_handlers()
            .with_handlers(|handlers| match handlers.entry(method_id) {
                Entry::Occupied(entry) => Err(IpcServiceEndpointError::DuplicateMethod(
                    entry.key().clone(),
                )),
                Entry::Vacant(entry) => {
                    tracing::debug!("registered method {}", entry.key());
                    let wrapped = move |ctx: RequestContext, bytes: Vec<u8>| {
                        Box::pin(handler(ctx, bytes))
                            as std::pin::Pin<Box<dyn Future<Output = _> + Send>>
                    };
                    entry.insert(Arc::new(wrapped));
                    Ok(())
                }
            })
            .await
    }

    /// Registers a typed handler for descriptor `M`.
    ///
    /// Argument decoding failures are reported to the caller like any other
    /// handler failure.
    async fn register_method<M, F, Fut>(&self, handler: F) -> Result<(), IpcServiceEndpointError>
    where
        M: IpcMethodPrebuffered + Send + Sync + 'static,
        M::Input: Send + 'static,
        M::Output: Send + 'static,
        F: Fn(RequestContext, M::Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<M::Output, BoxError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.register_prebuffered(M::METHOD_ID, move |ctx, bytes: Vec<u8>| {
            let handler = Arc::clone(&handler);
            async move {
                let input = M::decode_request(&bytes)?;
                let output = handler(ctx, input).await?;
                Ok::<_, BoxError>(M::encode_response(output)?)
            }
        })
        .await
    }

    async fn is_method_registered(&self, method_id: &str) -> bool {
        let method_id = method_id.to_string();
        self.get_prebuffered_handlers()
            .with_handlers(move |handlers| handlers.contains_key(&method_id))
            .await
    }

    /// Answers one request. Always yields exactly one response, whether the
    /// method is unknown, unauthorized, succeeds, fails or panics.
    ///
    /// Returns the response channel alongside the response.
    async fn dispatch(
        &self,
        context: RequestContext,
        request: ExecuteRequest,
    ) -> (String, ExecuteResponse) {
        let response_channel = request.response_channel();
        let ExecuteRequest {
            message_id,
            method_id,
            arg,
        } = request;

        tracing::debug!(
            "dispatching {} (message {}) from {}",
            method_id,
            message_id,
            context.sender
        );

        if let Some(policy) = self.exposure_policy() {
            if !policy.allows_sender(context.role, &method_id) {
                tracing::warn!(
                    "{} ({:?}) is not allowed to call {}",
                    context.sender,
                    context.role,
                    method_id
                );
                let err = IpcError::unauthorized(&method_id, context.role.map(|role| role.name()));
                return (response_channel, err.to_response());
            }
        }

        let handler = {
            let method_id = method_id.clone();
            self.get_prebuffered_handlers()
                .with_handlers(move |handlers| handlers.get(&method_id).cloned())
                .await
        };

        let response = match handler {
            Some(handler) => run_handler(handler, context, &method_id, arg).await,
            None => IpcError::method_not_found(&method_id).to_response(),
        };

        (response_channel, response)
    }

    /// Decodes a request arriving on `channel`, dispatches it and emits the
    /// single response through `on_emit`.
    ///
    /// Bytes that are not a request envelope cannot be answered, since the
    /// response channel is unknown; they are reported as an error and nothing
    /// is emitted.
    async fn read_bytes<E>(
        &self,
        context: RequestContext,
        channel: &str,
        bytes: &[u8],
        on_emit: E,
    ) -> Result<(), IpcServiceEndpointError>
    where
        E: Fn(&str, Vec<u8>) + Send + Sync,
    {
        if channel != self.channels().request {
            return Err(IpcServiceEndpointError::UnexpectedChannel(
                channel.to_string(),
            ));
        }

        let request = ExecuteRequest::decode(bytes).map_err(IpcServiceEndpointError::Decode)?;
        let (response_channel, response) = self.dispatch(context, request).await;
        on_emit(&response_channel, response.encode());

        Ok(())
    }
}

/// Runs a handler, normalizing errors and panics into a failure response.
async fn run_handler(
    handler: IpcPrebufferedHandler,
    context: RequestContext,
    method_id: &str,
    arg: Vec<u8>,
) -> ExecuteResponse {
    // A handler may panic while building its future or while it is polled.
    let future = match std::panic::catch_unwind(AssertUnwindSafe(|| handler(context, arg))) {
        Ok(future) => future,
        Err(panic) => return panic_response(method_id, panic),
    };

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(encoded)) => ExecuteResponse::success(encoded),
        Ok(Err(e)) => {
            let err = match e.downcast::<HandlerPayloadError>() {
                Ok(payload_error) => {
                    let message = payload_error.to_string();
                    IpcError::new(IpcErrorKind::HandlerFailed, method_id, message)
                        .with_payload(payload_error.0)
                }
                Err(e) => IpcError::new(IpcErrorKind::HandlerFailed, method_id, e.to_string()),
            };
            tracing::debug!("{} failed: {}", method_id, err.message);
            err.to_response()
        }
        Err(panic) => panic_response(method_id, panic),
    }
}

fn panic_response(method_id: &str, panic: Box<dyn Any + Send>) -> ExecuteResponse {
    let reason = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::warn!("handler for {} panicked: {}", method_id, reason);

    IpcError::new(
        IpcErrorKind::SystemError,
        method_id,
        format!("handler panicked: {reason}"),
    )
    .to_response()
}
