use std::io;

// A method descriptor couples the routing key of one remotely callable
// operation with the codec for its argument and result. Both halves of the
// bridge name the same descriptor type, which is what keeps the argument and
// result shapes in agreement without a shared schema file.
//
// "Prebuffered" because arguments and results travel as one complete payload;
// there is no streaming.

pub trait IpcMethodPrebuffered {
    /// Routing key; must be unique among all methods of one process pair.
    const METHOD_ID: &'static str;

    /// The high-level argument type (e.g., `String` for a URL).
    type Input;

    /// The high-level result type.
    type Output;

    /// Encodes the argument into a byte array.
    fn encode_request(input: Self::Input) -> Result<Vec<u8>, io::Error>;

    /// Decodes raw argument bytes.
    ///
    /// # Arguments
    /// * `bytes` - Serialized argument payload.
    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error>;

    /// Encodes the result into a byte array.
    fn encode_response(output: Self::Output) -> Result<Vec<u8>, io::Error>;

    /// Decodes raw result bytes.
    ///
    /// # Arguments
    /// * `bytes` - Serialized result payload.
    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error>;
}
