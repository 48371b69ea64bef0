use crate::WindowRole;
use lab_bridge::SenderId;

/// Who issued a request, handed to every handler alongside its argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub sender: SenderId,
    /// `None` when the transport attached the window without a role.
    pub role: Option<WindowRole>,
}

impl RequestContext {
    pub fn new(sender: SenderId, role: Option<WindowRole>) -> Self {
        Self { sender, role }
    }
}
