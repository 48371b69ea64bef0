mod traits;
pub use traits::IpcCallPrebuffered;
