use std::io;

/// Descriptor of an event the trusted process pushes to window contexts.
pub trait IpcEvent {
    /// Routing key among events; independent of method ids.
    const EVENT_ID: &'static str;

    type Data;

    fn encode_data(data: Self::Data) -> Result<Vec<u8>, io::Error>;

    fn decode_data(bytes: &[u8]) -> Result<Self::Data, io::Error>;
}
