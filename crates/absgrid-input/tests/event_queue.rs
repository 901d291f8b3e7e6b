//! Frame batching as a host would drive it: push native events, drain once per
//! frame, let a handler consume what it wants.

use absgrid_core::geometry::Size;
use absgrid_core::math::Vec2;
use absgrid_input::{Event, EventQueue, HandleStatus, PointerButton, PointerEvent, PointerKind};

fn touch(kind: PointerKind, x: f32, y: f32) -> Event {
    Event::Pointer(PointerEvent::touch(kind, 1, Vec2::new(x, y)))
}

#[test]
fn test_touch_gesture_keeps_order() {
    let mut queue = EventQueue::new();
    queue.push(touch(PointerKind::Down, 0.0, 0.0));
    queue.push(touch(PointerKind::Move, 5.0, 0.0));
    queue.push(touch(PointerKind::Move, 10.0, 0.0));
    queue.push(touch(PointerKind::Up, 10.0, 0.0));

    let batch = queue.drain();
    let kinds: Vec<_> = batch
        .iter()
        .filter_map(|event| match event {
            Event::Pointer(pointer) => Some((pointer.kind, pointer.client.x)),
            _ => None,
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            (PointerKind::Down, 0.0),
            (PointerKind::Move, 10.0),
            (PointerKind::Up, 10.0),
        ]
    );
    assert_eq!(queue.stats().events_dropped, 1);
}

#[test]
fn test_resize_comes_first() {
    let mut queue = EventQueue::new();
    queue.push(touch(PointerKind::Down, 0.0, 0.0));
    queue.push(Event::WindowResized(Size::new(1024.0, 768.0)));

    let batch = queue.drain();
    assert!(matches!(batch.iter().next(), Some(Event::WindowResized(_))));
}

#[test]
fn test_consumed_events_leave_the_batch() {
    let mut queue = EventQueue::new();
    queue.push(Event::Pointer(PointerEvent::mouse(
        PointerKind::Down,
        PointerButton::Secondary,
        Vec2::ZERO,
    )));
    queue.push(Event::Pointer(PointerEvent::mouse(
        PointerKind::Down,
        PointerButton::Primary,
        Vec2::ZERO,
    )));

    let mut batch = queue.drain();
    batch.dispatch(|event| match event {
        Event::Pointer(pointer) if pointer.is_primary_press() => HandleStatus::consumed(),
        _ => HandleStatus::ignored(),
    });

    assert_eq!(batch.len(), 1);
}
