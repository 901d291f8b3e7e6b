use std::collections::VecDeque;

use absgrid_core::geometry::Size;
use absgrid_core::math::Vec2;

/// Event queue with batching and deduplication
pub struct EventQueue {
    /// Pending events for this frame
    pending: VecDeque<Event>,

    /// High-priority events (processed first)
    priority: VecDeque<Event>,

    /// Only the newest move survives until something else is queued
    latest_move: Option<PointerEvent>,

    stats: EventStats,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(64),
            priority: VecDeque::with_capacity(8),
            latest_move: None,
            stats: EventStats::default(),
        }
    }

    /// Push event to queue (called from the host's event handler)
    pub fn push(&mut self, event: Event) {
        self.stats.events_received += 1;

        match event {
            Event::WindowResized(_) => {
                self.priority.push_back(event);
            }
            Event::Pointer(pointer) if pointer.kind == PointerKind::Move => {
                self.latest_move = Some(pointer);
            }
            _ => {
                // A move must not be reordered past the up/down that followed it
                if let Some(pointer) = self.latest_move.take() {
                    self.pending.push_back(Event::Pointer(pointer));
                }
                self.pending.push_back(event);
            }
        }
    }

    /// Process all events and return batch
    pub fn drain(&mut self) -> EventBatch {
        let mut events = Vec::with_capacity(self.priority.len() + self.pending.len() + 1);

        events.extend(self.priority.drain(..));
        events.extend(self.pending.drain(..));
        if let Some(pointer) = self.latest_move.take() {
            events.push(Event::Pointer(pointer));
        }

        self.stats.events_processed += events.len();
        self.stats.events_dropped = self.stats.events_received - self.stats.events_processed;

        EventBatch { events }
    }

    pub fn stats(&self) -> &EventStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EventStats::default();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBatch {
    events: Vec<Event>,
}

impl EventBatch {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Run `handler` over every event, dropping the ones it consumes.
    pub fn dispatch<H>(&mut self, mut handler: H)
    where
        H: FnMut(&Event) -> HandleStatus,
    {
        self.events.retain(|event| {
            let status = handler(event);
            !status.is_consumed()
        });
    }
}

impl FromIterator<Event> for EventBatch {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct EventStats {
    pub events_received: usize,
    pub events_processed: usize,
    pub events_dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer or touch input.
    Pointer(PointerEvent),
    /// The host window changed size (logical pixels).
    WindowResized(Size<f32>),
}

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse button pressed or touch started.
    Down,
    /// Pointer moved.
    Move,
    /// Mouse button released or touch ended.
    Up,
    /// Touch cancelled by the platform.
    Cancel,
}

/// Mouse button that changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    Other(u16),
}

bitflags::bitflags! {
    /// Buttons held down while the event fired.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u8 {
        const PRIMARY = 0b0000_0001;
        const SECONDARY = 0b0000_0010;
        const AUXILIARY = 0b0000_0100;
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => PointerButtons::PRIMARY,
            PointerButton::Secondary => PointerButtons::SECONDARY,
            PointerButton::Auxiliary => PointerButtons::AUXILIARY,
            PointerButton::Other(_) => PointerButtons::empty(),
        }
    }
}

/// Device the event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse {
        button: PointerButton,
        buttons: PointerButtons,
    },
    /// Coordinates of a touch event are those of its first touch point.
    Touch {
        /// Touch points on the target when the event fired.
        touches: usize,
    },
}

/// A pointer or touch event in host coordinates.
///
/// `client` is relative to the viewport, `page` to the scrolled document. Hosts
/// without scrolling pass the same value for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub source: PointerSource,
    pub client: Vec2,
    pub page: Vec2,
}

impl PointerEvent {
    pub fn mouse(kind: PointerKind, button: PointerButton, client: Vec2) -> Self {
        let buttons = match kind {
            PointerKind::Down | PointerKind::Move => button.into(),
            PointerKind::Up | PointerKind::Cancel => PointerButtons::empty(),
        };
        Self {
            kind,
            source: PointerSource::Mouse { button, buttons },
            client,
            page: client,
        }
    }

    pub fn touch(kind: PointerKind, touches: usize, client: Vec2) -> Self {
        Self {
            kind,
            source: PointerSource::Touch { touches },
            client,
            page: client,
        }
    }

    /// Offset the page coordinates by the document scroll position.
    pub fn with_scroll(mut self, scroll: Vec2) -> Self {
        self.page = self.client + scroll;
        self
    }

    /// Document scroll at the time of the event.
    pub fn scroll(&self) -> Vec2 {
        self.page - self.client
    }

    /// True for a primary-button press or a touch start with exactly one finger.
    pub fn is_primary_press(&self) -> bool {
        if self.kind != PointerKind::Down {
            return false;
        }
        match self.source {
            PointerSource::Mouse { button, .. } => button == PointerButton::Primary,
            PointerSource::Touch { touches } => touches == 1,
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(self.source, PointerSource::Touch { .. })
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleStatus: u8 {
        const HANDLED = 0b00000001;
        const CONSUMED = 0b00000010;
    }
}

impl HandleStatus {
    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn consumed() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::CONSUMED.bits())
    }

    pub const fn handled() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: PointerKind, x: f32, y: f32) -> Event {
        Event::Pointer(PointerEvent::mouse(kind, PointerButton::Primary, Vec2::new(x, y)))
    }

    #[test]
    fn test_moves_are_deduplicated() {
        let mut queue = EventQueue::new();
        queue.push(mouse(PointerKind::Move, 1.0, 1.0));
        queue.push(mouse(PointerKind::Move, 2.0, 2.0));
        queue.push(mouse(PointerKind::Move, 3.0, 3.0));

        let batch = queue.drain();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.iter().next(), Some(&mouse(PointerKind::Move, 3.0, 3.0)));
        assert_eq!(queue.stats().events_dropped, 2);
    }

    #[test]
    fn test_move_keeps_its_place_before_release() {
        let mut queue = EventQueue::new();
        queue.push(mouse(PointerKind::Down, 0.0, 0.0));
        queue.push(mouse(PointerKind::Move, 5.0, 5.0));
        queue.push(mouse(PointerKind::Up, 5.0, 5.0));

        let kinds: Vec<_> = queue
            .drain()
            .iter()
            .map(|e| match e {
                Event::Pointer(p) => p.kind,
                Event::WindowResized(_) => unreachable!(),
            })
            .collect();
        assert_eq!(kinds, vec![PointerKind::Down, PointerKind::Move, PointerKind::Up]);
    }

    #[test]
    fn test_resize_is_prioritized() {
        let mut queue = EventQueue::new();
        queue.push(mouse(PointerKind::Down, 0.0, 0.0));
        queue.push(Event::WindowResized(Size::new(640.0, 480.0)));

        let batch = queue.drain();
        assert!(matches!(batch.iter().next(), Some(Event::WindowResized(_))));
    }

    #[test]
    fn test_dispatch_removes_consumed() {
        let mut batch: EventBatch = [
            mouse(PointerKind::Move, 1.0, 1.0),
            Event::WindowResized(Size::new(10.0, 10.0)),
        ]
        .into_iter()
        .collect();

        batch.dispatch(|event| match event {
            Event::Pointer(_) => HandleStatus::consumed(),
            _ => HandleStatus::ignored(),
        });
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_primary_press() {
        let left = PointerEvent::mouse(PointerKind::Down, PointerButton::Primary, Vec2::ZERO);
        let right = PointerEvent::mouse(PointerKind::Down, PointerButton::Secondary, Vec2::ZERO);
        let one_finger = PointerEvent::touch(PointerKind::Down, 1, Vec2::ZERO);
        let pinch = PointerEvent::touch(PointerKind::Down, 2, Vec2::ZERO);

        assert!(left.is_primary_press());
        assert!(!right.is_primary_press());
        assert!(one_finger.is_primary_press());
        assert!(!pinch.is_primary_press());
    }

    #[test]
    fn test_only_down_is_a_press() {
        for kind in [PointerKind::Move, PointerKind::Up, PointerKind::Cancel] {
            let mouse = PointerEvent::mouse(kind, PointerButton::Primary, Vec2::ZERO);
            let finger = PointerEvent::touch(kind, 1, Vec2::ZERO);
            assert!(!mouse.is_primary_press(), "{:?}", kind);
            assert!(!finger.is_primary_press(), "{:?}", kind);
        }
    }

    #[test]
    fn test_scroll_offset() {
        let event = PointerEvent::mouse(PointerKind::Down, PointerButton::Primary, Vec2::new(10.0, 20.0))
            .with_scroll(Vec2::new(0.0, 300.0));
        assert_eq!(event.page, Vec2::new(10.0, 320.0));
        assert_eq!(event.scroll(), Vec2::new(0.0, 300.0));
    }
}
