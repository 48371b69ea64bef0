use crate::error::IpcServiceEndpointError;
use lab_bridge::{channel::ProtocolChannels, envelope::EventEmit};
use lab_bridge_service::IpcEvent;

/// Pushes event `E` to one window through `on_emit`.
///
/// Events are fire-and-forget: there is no reply and no delivery report.
pub fn emit_remote_event<E, F>(
    channels: ProtocolChannels,
    data: E::Data,
    on_emit: F,
) -> Result<(), IpcServiceEndpointError>
where
    E: IpcEvent,
    F: FnOnce(&str, Vec<u8>),
{
    let data = E::encode_data(data).map_err(IpcServiceEndpointError::Encode)?;
    let envelope = EventEmit::new(E::EVENT_ID, data);

    tracing::trace!("emitting event {}", E::EVENT_ID);
    on_emit(channels.event, envelope.encode());

    Ok(())
}
