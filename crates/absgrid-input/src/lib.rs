//! Pointer and touch input for absgrid.
//!
//! Hosts translate their native events into [`event::Event`] values, queue them in an
//! [`event::EventQueue`] and hand the drained [`event::EventBatch`] to whichever
//! component is listening. A component that consumes an event suppresses the host's
//! default behaviour for it (text selection, scrolling).

pub mod event;
#[cfg(feature = "winit")]
pub mod winit_bridge;

pub use event::{
    Event, EventBatch, EventQueue, EventStats, HandleStatus, PointerButton, PointerButtons,
    PointerEvent, PointerKind, PointerSource,
};
