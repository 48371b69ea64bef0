/// Declares a method descriptor whose argument and result are `bitcode`
/// encoded.
macro_rules! bitcode_method {
    ($(#[$meta:meta])* $name:ident, $id:literal, $input:ty => $output:ty) => {
        $(#[$meta])*
        pub struct $name;

        impl lab_bridge_service::prebuffered::IpcMethodPrebuffered for $name {
            const METHOD_ID: &'static str = $id;

            type Input = $input;
            type Output = $output;

            fn encode_request(input: Self::Input) -> Result<Vec<u8>, std::io::Error> {
                Ok(lab_bridge_service::codec::encode(&input))
            }

            fn decode_request(bytes: &[u8]) -> Result<Self::Input, std::io::Error> {
                lab_bridge_service::codec::decode(bytes)
            }

            fn encode_response(output: Self::Output) -> Result<Vec<u8>, std::io::Error> {
                Ok(lab_bridge_service::codec::encode(&output))
            }

            fn decode_response(bytes: &[u8]) -> Result<Self::Output, std::io::Error> {
                lab_bridge_service::codec::decode(bytes)
            }
        }
    };
}

/// Declares an event descriptor with `bitcode` encoded data.
macro_rules! bitcode_event {
    ($(#[$meta:meta])* $name:ident, $id:literal, $data:ty) => {
        $(#[$meta])*
        pub struct $name;

        impl lab_bridge_service::IpcEvent for $name {
            const EVENT_ID: &'static str = $id;

            type Data = $data;

            fn encode_data(data: Self::Data) -> Result<Vec<u8>, std::io::Error> {
                Ok(lab_bridge_service::codec::encode(&data))
            }

            fn decode_data(bytes: &[u8]) -> Result<Self::Data, std::io::Error> {
                lab_bridge_service::codec::decode(bytes)
            }
        }
    };
}
