//! Listener that records notifications for later assertions.

use std::sync::Arc;

use absgrid::{DragListener, GridItem, GridListener, ItemKey};
use absgrid_core::math::Vec2;
use absgrid_input::PointerEvent;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum ListenerCall {
    Move { source: ItemKey, target: ItemKey },
    DragStart(ItemKey),
    /// Client position of the forwarded event.
    DragMove(Vec2),
    DragEnd {
        key: ItemKey,
        /// Whether the session ended from a pointer event rather than teardown.
        from_event: bool,
    },
    ForceResizeDone,
}

/// Clones share one call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    calls: Arc<Mutex<Vec<ListenerCall>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ListenerCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Reorder notifications as `(source, target)` pairs.
    pub fn moves(&self) -> Vec<(ItemKey, ItemKey)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ListenerCall::Move { source, target } => Some((source.clone(), target.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn count_starts(&self) -> usize {
        self.count(|call| matches!(call, ListenerCall::DragStart(_)))
    }

    pub fn count_drag_moves(&self) -> usize {
        self.count(|call| matches!(call, ListenerCall::DragMove(_)))
    }

    pub fn ends(&self) -> Vec<ItemKey> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ListenerCall::DragEnd { key, .. } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&ListenerCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: ListenerCall) {
        self.calls.lock().push(call);
    }
}

impl<T: GridItem> DragListener<T> for RecordingListener {
    fn on_move(&mut self, source: &ItemKey, target: &ItemKey) {
        self.record(ListenerCall::Move {
            source: source.clone(),
            target: target.clone(),
        });
    }

    fn on_drag_start(&mut self, item: &T) {
        self.record(ListenerCall::DragStart(item.key()));
    }

    fn on_drag_move(&mut self, event: &PointerEvent) {
        self.record(ListenerCall::DragMove(event.client));
    }

    fn on_drag_end(&mut self, event: Option<&PointerEvent>, item: &T) {
        self.record(ListenerCall::DragEnd {
            key: item.key(),
            from_event: event.is_some(),
        });
    }
}

impl<T: GridItem> GridListener<T> for RecordingListener {
    fn on_force_resize_done(&mut self) {
        self.record(ListenerCall::ForceResizeDone);
    }
}
