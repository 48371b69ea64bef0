mod prebuffered_traits;
pub use prebuffered_traits::*;
