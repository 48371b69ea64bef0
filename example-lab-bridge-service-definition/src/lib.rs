//! Everything the desktop shell exposes over the bridge: the callable
//! methods, the events the trusted process pushes, and which window roles
//! may use which methods.

#[macro_use]
mod macros;

pub mod events;
pub mod prebuffered;
pub mod window_roles;
