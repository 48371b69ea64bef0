use std::collections::HashMap;
use std::sync::Arc;

/// Handle returned by [`crate::IpcCaller::on_remote_event`], used to detach
/// the listener again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type EventCallback = Arc<dyn Fn(&[u8]) + Send + Sync>;

#[derive(Default)]
pub(crate) struct EventListeners {
    next_id: u64,
    by_event: HashMap<String, Vec<(ListenerId, EventCallback)>>,
}

impl EventListeners {
    pub(crate) fn add(&mut self, event_id: &str, callback: EventCallback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_event
            .entry(event_id.to_string())
            .or_default()
            .push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        self.by_event.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|(listener_id, _)| *listener_id != id);
            removed |= listeners.len() != before;
            !listeners.is_empty()
        });
        removed
    }

    /// Snapshot of the callbacks for `event_id`, so they can run unlocked.
    pub(crate) fn callbacks(&self, event_id: &str) -> Vec<EventCallback> {
        self.by_event
            .get(event_id)
            .map(|listeners| listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, event_id: &str) -> usize {
        self.by_event.get(event_id).map_or(0, Vec::len)
    }
}
