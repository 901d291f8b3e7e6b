//! Per-item render state: drag offset and the ease-back sequence after a drop.
//!
//! When a started drag is released the item goes through two overlapping timers:
//!
//! - release (150 ms): viewport-fixed style animating from the drop point into the
//!   slot's on-screen position;
//! - pause (170 ms): in-flow style with transitions off, so switching back from
//!   fixed to absolute positioning does not animate a jump.
//!
//! After both expire the item renders in normal flow again.

use std::time::Duration;

use absgrid_core::math::Vec2;

use crate::drag::DragUpdate;
use crate::layout::LayoutManager;
use crate::style::ItemStyle;

/// How long the release style is shown after a drop.
pub const RELEASE_DURATION: Duration = Duration::from_millis(150);

/// How long transitions stay disabled after a drop.
pub const PAUSE_DURATION: Duration = Duration::from_millis(170);

/// Which style an item is currently rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    Hidden,
    Dragging,
    Releasing,
    Paused,
    InFlow,
}

/// Everything the style choice depends on besides the item's own timers.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub layout: &'a LayoutManager,
    /// Dense index; `None` for filtered items, which render hidden.
    pub index: Option<usize>,
    pub animation: Option<&'a str>,
    pub filtered: bool,
    pub disabled: bool,
    /// This item is the one the drag session holds.
    pub dragged: bool,
    /// Grid container position on screen.
    pub container_origin: Vec2,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDisplay {
    drag_offset: Option<Vec2>,
    release_remaining: Option<Duration>,
    pause_remaining: Option<Duration>,
}

impl ItemDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update from the drag session.
    ///
    /// Any move cancels a pending ease-back. A release starts it, but only if the
    /// drag had actually started; a bare press and release snaps nothing.
    pub fn apply_update(&mut self, update: DragUpdate) {
        match update {
            DragUpdate::Moved(offset) => {
                self.drag_offset = Some(offset);
                self.release_remaining = None;
                self.pause_remaining = None;
            }
            DragUpdate::Released { started } => {
                self.drag_offset = None;
                if started {
                    self.release_remaining = Some(RELEASE_DURATION);
                    self.pause_remaining = Some(PAUSE_DURATION);
                } else {
                    self.release_remaining = None;
                    self.pause_remaining = None;
                }
            }
        }
    }

    pub fn drag_offset(&self) -> Option<Vec2> {
        self.drag_offset
    }

    pub fn is_releasing(&self) -> bool {
        self.release_remaining.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.pause_remaining.is_some()
    }

    /// Advance the ease-back timers.
    ///
    /// Returns `true` while a timer is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        fn advance(timer: &mut Option<Duration>, dt: Duration) {
            if let Some(remaining) = timer {
                match remaining.checked_sub(dt) {
                    Some(left) if !left.is_zero() => *remaining = left,
                    _ => *timer = None,
                }
            }
        }

        advance(&mut self.release_remaining, dt);
        advance(&mut self.pause_remaining, dt);
        self.is_releasing() || self.is_paused()
    }

    pub fn phase(&self, ctx: &StyleContext<'_>) -> DisplayPhase {
        if ctx.disabled {
            DisplayPhase::Hidden
        } else if ctx.dragged && self.drag_offset.is_some() {
            DisplayPhase::Dragging
        } else if self.is_releasing() {
            DisplayPhase::Releasing
        } else if self.is_paused() {
            DisplayPhase::Paused
        } else {
            DisplayPhase::InFlow
        }
    }

    pub fn style(&self, ctx: &StyleContext<'_>) -> ItemStyle {
        let index = ctx.index.unwrap_or(0);
        let filtered = ctx.filtered || ctx.index.is_none();
        let in_flow = || ctx.layout.style_for(index, ctx.animation, filtered);

        match self.phase(ctx) {
            DisplayPhase::Hidden => ItemStyle::hidden(),
            DisplayPhase::Dragging => {
                // phase() only reports Dragging with an offset present
                let offset = self.drag_offset.unwrap_or_default();
                ItemStyle::dragging(&in_flow(), offset)
            }
            DisplayPhase::Releasing => {
                ctx.layout
                    .style_for_release(index, ctx.animation, filtered, ctx.container_origin)
            }
            DisplayPhase::Paused => in_flow().without_transition(),
            DisplayPhase::InFlow => in_flow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutOptions;
    use crate::style::{Positioning, Transition};

    fn layout() -> LayoutManager {
        LayoutManager::new(
            &LayoutOptions {
                item_width: 100.0,
                item_height: 100.0,
                vertical_margin: None,
                zoom: 1.0,
            },
            400.0,
            false,
        )
    }

    fn ctx(layout: &LayoutManager, dragged: bool) -> StyleContext<'_> {
        StyleContext {
            layout,
            index: Some(1),
            animation: Some("transform 300ms ease"),
            filtered: false,
            disabled: false,
            dragged,
            container_origin: Vec2::new(8.0, 64.0),
        }
    }

    #[test]
    fn test_in_flow_by_default() {
        let layout = layout();
        let display = ItemDisplay::new();
        let style = display.style(&ctx(&layout, false));
        assert_eq!(style, layout.style_for(1, Some("transform 300ms ease"), false));
    }

    #[test]
    fn test_dragging_uses_offset() {
        let layout = layout();
        let mut display = ItemDisplay::new();
        display.apply_update(DragUpdate::Moved(Vec2::new(40.0, 50.0)));

        let style = display.style(&ctx(&layout, true));
        assert_eq!(display.phase(&ctx(&layout, true)), DisplayPhase::Dragging);
        assert_eq!(style.positioning, Some(Positioning::Fixed));
        assert_eq!(style.translate, Some(Vec2::new(40.0, 50.0)));
    }

    #[test]
    fn test_armed_item_stays_in_flow_until_it_moves() {
        let layout = layout();
        let display = ItemDisplay::new();
        assert_eq!(display.phase(&ctx(&layout, true)), DisplayPhase::InFlow);
    }

    #[test]
    fn test_ease_back_sequence() {
        let layout = layout();
        let mut display = ItemDisplay::new();
        display.apply_update(DragUpdate::Moved(Vec2::new(40.0, 50.0)));
        display.apply_update(DragUpdate::Released { started: true });
        let c = ctx(&layout, false);

        assert_eq!(display.phase(&c), DisplayPhase::Releasing);
        let release = display.style(&c);
        assert_eq!(release.translate, Some(Vec2::new(108.0, 64.0)));

        assert!(display.tick(Duration::from_millis(100)));
        assert_eq!(display.phase(&c), DisplayPhase::Releasing);

        assert!(display.tick(Duration::from_millis(50)));
        assert_eq!(display.phase(&c), DisplayPhase::Paused);
        assert_eq!(display.style(&c).transition, Some(Transition::Disabled));
        assert_eq!(display.style(&c).positioning, Some(Positioning::Absolute));

        assert!(!display.tick(Duration::from_millis(20)));
        assert_eq!(display.phase(&c), DisplayPhase::InFlow);
    }

    #[test]
    fn test_unstarted_release_skips_ease_back() {
        let layout = layout();
        let mut display = ItemDisplay::new();
        display.apply_update(DragUpdate::Released { started: false });
        assert_eq!(display.phase(&ctx(&layout, false)), DisplayPhase::InFlow);
        assert!(!display.tick(Duration::from_millis(16)));
    }

    #[test]
    fn test_disabled_is_hidden() {
        let layout = layout();
        let mut c = ctx(&layout, false);
        c.disabled = true;
        assert_eq!(ItemDisplay::new().style(&c), ItemStyle::hidden());
    }

    #[test]
    fn test_unindexed_item_is_invisible() {
        let layout = layout();
        let mut c = ctx(&layout, false);
        c.index = None;
        c.filtered = true;
        assert!(!ItemDisplay::new().style(&c).visible);
    }
}
