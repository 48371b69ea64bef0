use lab_bridge_service::prebuffered::IpcMethodPrebuffered;
use std::io;

/// Returns its argument unchanged. Used for liveness checks.
pub struct Echo;

impl IpcMethodPrebuffered for Echo {
    const METHOD_ID: &'static str = "echo";

    type Input = String;
    type Output = String;

    fn encode_request(input: Self::Input) -> Result<Vec<u8>, io::Error> {
        Ok(input.into_bytes())
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Input, io::Error> {
        String::from_utf8(bytes.to_vec()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn encode_response(output: Self::Output) -> Result<Vec<u8>, io::Error> {
        Ok(output.into_bytes())
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Output, io::Error> {
        String::from_utf8(bytes.to_vec()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
