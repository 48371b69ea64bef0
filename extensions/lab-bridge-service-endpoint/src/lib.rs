mod endpoint;
pub use endpoint::*;

mod endpoint_interface;
pub use endpoint_interface::*;

pub mod error;

mod events;
pub use events::emit_remote_event;

mod with_handlers_trait;
pub use with_handlers_trait::*;
