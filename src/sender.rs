use std::fmt;

/// Identifies one untrusted window context attached to the trusted process.
///
/// Transports assign these when a window connects; the endpoint uses them to
/// look up the window's role when authorizing requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SenderId(pub u32);

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}
