//! Pointer-drag state machine shared by every item of a grid.
//!
//! A session is armed by a primary press on an item, becomes active on the first
//! qualifying move, and ends on release or cancel:
//!
//! ```text
//! Idle --start_drag--> Armed --move--> Active --up/cancel--> Idle
//!                        \-------------up/cancel----------->/
//! ```
//!
//! While a session exists the manager consumes pointer events from the batch it is
//! given, which is how the host's default text selection and scrolling are
//! suppressed for the duration.
//!
//! The manager only produces offsets; the floating style of the dragged item is
//! [`ItemStyle::dragging`](crate::style::ItemStyle::dragging).

use absgrid_core::geometry::Rect;
use absgrid_core::math::{Vec2, round_vec};
use absgrid_core::profiling::profile_function;
use absgrid_input::{Event, EventBatch, HandleStatus, PointerEvent, PointerKind};

use crate::config::{ThresholdPolicy, effective_zoom};
use crate::hit_test::HitTest;
use crate::item::{GridItem, ItemKey};

/// Notifications about a drag, all optional.
pub trait DragListener<T> {
    /// The dragged item is over another item's slot.
    fn on_move(&mut self, _source: &ItemKey, _target: &ItemKey) {}

    fn on_drag_start(&mut self, _item: &T) {}

    /// Every pointer move during a session, after the manager has processed it.
    fn on_drag_move(&mut self, _event: &PointerEvent) {}

    /// `event` is `None` when the session was torn down without a pointer event.
    fn on_drag_end(&mut self, _event: Option<&PointerEvent>, _item: &T) {}
}

impl<T> DragListener<T> for () {}

/// Update delivered to the dragged item's renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Offset of the item's top-left corner in client coordinates.
    Moved(Vec2),
    /// Final call of a session: drop the offset override.
    Released {
        /// Whether the session ever became active.
        started: bool,
    },
}

pub type UpdateFn = Box<dyn FnMut(DragUpdate)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Pressed, no qualifying move yet.
    Armed,
    Active,
}

#[derive(Debug)]
struct DragSession<T> {
    item: T,
    key: ItemKey,
    started: bool,
    /// Pointer position relative to the item's top-left at grab time, unzoomed.
    grab_offset: Vec2,
    press_page: Vec2,
    offset: Option<Vec2>,
    zoom: f32,
    last_target: Option<ItemKey>,
}

/// Turns pointer events into drag offsets and reorder notifications.
pub struct DragManager<T, L = ()> {
    listener: L,
    threshold: ThresholdPolicy,
    session: Option<DragSession<T>>,
    on_update: Option<UpdateFn>,
}

impl<T: GridItem, L: DragListener<T>> DragManager<T, L> {
    pub fn new(listener: L) -> Self {
        Self {
            listener,
            threshold: ThresholdPolicy::default(),
            session: None,
            on_update: None,
        }
    }

    pub fn with_threshold(mut self, threshold: ThresholdPolicy) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn set_threshold(&mut self, threshold: ThresholdPolicy) {
        self.threshold = threshold;
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(s) if s.started => DragPhase::Active,
            Some(_) => DragPhase::Armed,
        }
    }

    /// True while pointer events are being routed to this manager.
    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_item(&self) -> Option<&T> {
        self.session.as_ref().map(|s| &s.item)
    }

    pub fn is_dragging(&self, key: &ItemKey) -> bool {
        self.session.as_ref().is_some_and(|s| &s.key == key)
    }

    /// Current offset of the dragged item, once it has moved.
    pub fn drag_offset(&self) -> Option<Vec2> {
        self.session.as_ref().and_then(|s| s.offset)
    }

    /// Arm a session for `item`.
    ///
    /// `anchor` is the item element's bounding box in client coordinates and
    /// `container_zoom` the scale between pointer and grid coordinates (`None` or
    /// `0` mean 1). Ignored unless `event` is a primary press or a single touch, or
    /// while another session exists. Returns consumed when a session was armed.
    pub fn start_drag(
        &mut self,
        event: &PointerEvent,
        anchor: Rect<f32>,
        item: T,
        on_update: UpdateFn,
        container_zoom: Option<f32>,
    ) -> HandleStatus {
        if let Some(active) = &self.session {
            tracing::debug!(
                active = %active.key,
                ignored = %item.key(),
                "drag start ignored, a session is already running"
            );
            return HandleStatus::ignored();
        }
        if !event.is_primary_press() {
            tracing::trace!(?event.source, "drag start ignored, not a primary press");
            return HandleStatus::ignored();
        }

        let zoom = effective_zoom(container_zoom);
        let grab_offset = round_vec(event.page * (1.0 / zoom) - (anchor.origin() + event.scroll()));
        let key = item.key();
        tracing::debug!(%key, ?grab_offset, zoom, "drag armed");

        self.on_update = Some(on_update);
        self.session = Some(DragSession {
            item,
            key,
            started: false,
            grab_offset,
            press_page: event.page,
            offset: None,
            zoom,
            last_target: None,
        });
        if let Some(session) = &self.session {
            self.listener.on_drag_start(&session.item);
        }

        HandleStatus::consumed()
    }

    /// Route one pointer event into the running session.
    pub fn handle_pointer(&mut self, event: &PointerEvent, hit: &dyn HitTest) -> HandleStatus {
        if self.session.is_none() {
            return HandleStatus::ignored();
        }
        match event.kind {
            PointerKind::Move => self.drag_move(event, hit),
            PointerKind::Up | PointerKind::Cancel => {
                self.end_drag(Some(event));
                HandleStatus::handled()
            }
            PointerKind::Down => HandleStatus::ignored(),
        }
    }

    /// Route a batch of events into the running session.
    pub fn handle_events(&mut self, events: &mut EventBatch, hit: &dyn HitTest) {
        if self.session.is_none() {
            return;
        }
        events.dispatch(|event| match event {
            Event::Pointer(pointer) => self.handle_pointer(pointer, hit),
            _ => HandleStatus::ignored(),
        });
    }

    fn drag_move(&mut self, event: &PointerEvent, hit: &dyn HitTest) -> HandleStatus {
        profile_function!();
        let Some(session) = self.session.as_mut() else {
            return HandleStatus::ignored();
        };

        let movement = (event.page - session.press_page).abs();
        let past_threshold = match self.threshold {
            ThresholdPolicy::Bypass => true,
            ThresholdPolicy::Honor(tolerance) => movement.x > tolerance || movement.y > tolerance,
        };

        let mut status = HandleStatus::handled();
        if past_threshold {
            if !session.started {
                tracing::debug!(key = %session.key, "drag started");
                session.started = true;
            }

            let offset = event.client * (1.0 / session.zoom) - session.grab_offset;
            session.offset = Some(offset);
            if let Some(update) = self.on_update.as_mut() {
                update(DragUpdate::Moved(offset));
            }

            match hit.drop_target_at(event.client) {
                Some(target) if target != session.key => {
                    if session.last_target.as_ref() != Some(&target) {
                        tracing::debug!(source = %session.key, %target, "drop target changed");
                        self.listener.on_move(&session.key, &target);
                        session.last_target = Some(target);
                    }
                }
                _ => session.last_target = None,
            }

            status = HandleStatus::consumed();
        }

        self.listener.on_drag_move(event);
        status
    }

    /// Finish the running session.
    ///
    /// Notifies the listener with the dragged item, clears the session, then sends
    /// [`DragUpdate::Released`] to the update callback and discards it so late
    /// events cannot reach released state. No-op without a session.
    pub fn end_drag(&mut self, event: Option<&PointerEvent>) {
        let Some(session) = self.session.take() else {
            return;
        };
        tracing::debug!(key = %session.key, started = session.started, "drag ended");

        self.listener.on_drag_end(event, &session.item);
        if let Some(mut update) = self.on_update.take() {
            update(DragUpdate::Released {
                started: session.started,
            });
        }
    }

    /// End the session without a pointer event, e.g. on teardown.
    pub fn cancel(&mut self) {
        self.end_drag(None);
    }
}

impl<T, L: std::fmt::Debug> std::fmt::Debug for DragManager<T, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragManager")
            .field("listener", &self.listener)
            .field("threshold", &self.threshold)
            .field("dragging", &self.session.as_ref().map(|s| &s.key))
            .field("started", &self.session.as_ref().is_some_and(|s| s.started))
            .finish()
    }
}
