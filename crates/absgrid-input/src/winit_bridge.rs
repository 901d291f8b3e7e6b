//! Translation of `winit` window events into absgrid pointer events.

use absgrid_core::geometry::Size;
use absgrid_core::math::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

use crate::event::{Event, PointerButton, PointerButtons, PointerEvent, PointerKind, PointerSource};

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Auxiliary,
            MouseButton::Back => PointerButton::Other(3),
            MouseButton::Forward => PointerButton::Other(4),
            MouseButton::Other(n) => PointerButton::Other(n),
        }
    }
}

impl From<TouchPhase> for PointerKind {
    fn from(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Started => PointerKind::Down,
            TouchPhase::Moved => PointerKind::Move,
            TouchPhase::Ended => PointerKind::Up,
            TouchPhase::Cancelled => PointerKind::Cancel,
        }
    }
}

/// Tracks the cursor and active touches so button events, which carry no
/// position in `winit`, can be turned into full pointer events.
#[derive(Debug, Clone)]
pub struct WinitTranslator {
    scale_factor: f64,
    cursor: Vec2,
    buttons: PointerButtons,
    touches: usize,
}

impl WinitTranslator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: Vec2::ZERO,
            buttons: PointerButtons::empty(),
            touches: 0,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    fn logical(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new((x / self.scale_factor) as f32, (y / self.scale_factor) as f32)
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<Event> {
        match event {
            WindowEvent::Resized(size) => Some(Event::WindowResized(Size::new(
                (size.width as f64 / self.scale_factor) as f32,
                (size.height as f64 / self.scale_factor) as f32,
            ))),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.logical(position.x, position.y);
                Some(Event::Pointer(PointerEvent {
                    kind: PointerKind::Move,
                    source: PointerSource::Mouse {
                        button: PointerButton::Primary,
                        buttons: self.buttons,
                    },
                    client: self.cursor,
                    page: self.cursor,
                }))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = PointerButton::from(*button);
                let kind = match state {
                    ElementState::Pressed => {
                        self.buttons.insert(button.into());
                        PointerKind::Down
                    }
                    ElementState::Released => {
                        self.buttons.remove(button.into());
                        PointerKind::Up
                    }
                };
                Some(Event::Pointer(PointerEvent {
                    kind,
                    source: PointerSource::Mouse {
                        button,
                        buttons: self.buttons,
                    },
                    client: self.cursor,
                    page: self.cursor,
                }))
            }
            WindowEvent::Touch(touch) => {
                let kind = PointerKind::from(touch.phase);
                match kind {
                    PointerKind::Down => self.touches += 1,
                    PointerKind::Up | PointerKind::Cancel => {
                        self.touches = self.touches.saturating_sub(1)
                    }
                    PointerKind::Move => {}
                }
                let location = self.logical(touch.location.x, touch.location.y);
                // Down counts the new finger; up reports the fingers that remain
                let touches = match kind {
                    PointerKind::Down | PointerKind::Move => self.touches.max(1),
                    PointerKind::Up | PointerKind::Cancel => self.touches,
                };
                Some(Event::Pointer(PointerEvent::touch(kind, touches, location)))
            }
            // Window chrome and keyboard events have no meaning for the grid
            _ => {
                tracing::trace!("ignoring window event: {:?}", event);
                None
            }
        }
    }
}

impl Default for WinitTranslator {
    fn default() -> Self {
        Self::new(1.0)
    }
}
