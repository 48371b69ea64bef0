pub mod codec;
pub mod error;
pub use error::{HandlerPayloadError, IpcError, IpcErrorKind};
mod event;
pub use event::*;
pub mod exposure;
pub use exposure::{ExposurePolicy, WindowRole};
pub mod prebuffered;
mod request_context;
pub use request_context::RequestContext;
mod result_status;
pub use result_status::IpcResultStatus;
