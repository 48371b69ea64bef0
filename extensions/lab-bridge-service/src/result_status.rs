use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome byte carried in every `ExecuteResponse`.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum IpcResultStatus {
    Success = 0,
    Fail = 1,
    SystemError = 2,
    MethodNotFound = 3,
    Unauthorized = 4,
}
