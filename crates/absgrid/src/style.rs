//! Semantic style descriptors for grid items and the grid container.
//!
//! Styles carry only what positioning needs. [`ItemStyle::css_declarations`] expands
//! them into the property list a web host writes, including vendor-prefixed
//! duplicates of `transform` and `transition`.

use absgrid_core::geometry::Size;
use absgrid_core::math::Vec2;

/// Transition used while an item eases from its drop position into its slot.
pub const RELEASE_TRANSITION: &str = "transform 150ms ease 0s";

/// Stacking order for items that leave normal flow (dragged or releasing).
pub const FLOATING_Z_INDEX: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    /// Relative to the grid container.
    Absolute,
    /// Relative to the viewport.
    Fixed,
}

impl Positioning {
    pub fn as_css(&self) -> &'static str {
        match self {
            Positioning::Absolute => "absolute",
            Positioning::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Transitions explicitly switched off.
    Disabled,
    /// A CSS transition shorthand such as `transform 300ms ease`.
    Animate(String),
}

/// Position, size, visibility and transition of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStyle {
    /// `None` leaves positioning to the host (hidden items).
    pub positioning: Option<Positioning>,
    pub size: Option<Size<f32>>,
    /// Translation applied with `translate3d(x, y, 0)`.
    pub translate: Option<Vec2>,
    pub visible: bool,
    /// `None` leaves the property unset.
    pub transition: Option<Transition>,
    pub z_index: Option<i32>,
    /// Pin `left`/`top` to 0 so the translation alone places the item.
    pub pinned: bool,
    /// `false` lets hit-testing see through the element.
    pub pointer_events: bool,
}

impl ItemStyle {
    /// Style of a disabled or missing item.
    pub fn hidden() -> Self {
        Self {
            positioning: None,
            size: None,
            translate: None,
            visible: false,
            transition: None,
            z_index: None,
            pinned: false,
            pointer_events: true,
        }
    }

    /// Floating style for the item under the pointer.
    ///
    /// Overlays `base`: position, translation, stacking, transition and pointer
    /// events are replaced; size and visibility are kept.
    pub fn dragging(base: &ItemStyle, offset: Vec2) -> Self {
        Self {
            positioning: Some(Positioning::Fixed),
            translate: Some(offset),
            transition: Some(Transition::Disabled),
            z_index: Some(FLOATING_Z_INDEX),
            pinned: true,
            pointer_events: false,
            ..base.clone()
        }
    }

    /// Same style with transitions switched off.
    pub fn without_transition(mut self) -> Self {
        self.transition = Some(Transition::Disabled);
        self
    }

    /// Expand into `(property, value)` pairs for a CSS host.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(16);

        if let Some(size) = self.size {
            out.push(("width", format!("{}px", size.width)));
            out.push(("height", format!("{}px", size.height)));
        }
        if let Some(t) = self.translate {
            let transform = format!("translate3d({}px, {}px, 0)", t.x, t.y);
            out.push(("-webkit-transform", transform.clone()));
            out.push(("-moz-transform", transform.clone()));
            out.push(("-ms-transform", transform.clone()));
            out.push(("transform", transform));
        }
        if let Some(positioning) = self.positioning {
            out.push(("position", positioning.as_css().to_string()));
            out.push(("box-sizing", "border-box".to_string()));
        }
        out.push((
            "display",
            if self.visible { "block" } else { "none" }.to_string(),
        ));
        if let Some(z) = self.z_index {
            out.push(("z-index", z.to_string()));
        }
        if self.pinned {
            out.push(("left", "0".to_string()));
            out.push(("top", "0".to_string()));
        }
        match &self.transition {
            Some(Transition::Disabled) => {
                for property in TRANSITION_PROPERTIES {
                    out.push((property, "none".to_string()));
                }
            }
            Some(Transition::Animate(spec)) => {
                out.push(("-webkit-transition", format!("-webkit-{}", spec)));
                out.push(("-moz-transition", format!("-moz-{}", spec)));
                out.push(("-ms-transition", format!("-ms-{}", spec)));
                out.push(("transition", spec.clone()));
            }
            None => {}
        }
        if !self.pointer_events {
            out.push(("pointer-events", "none".to_string()));
        }

        out
    }
}

const TRANSITION_PROPERTIES: [&str; 4] = [
    "-webkit-transition",
    "-moz-transition",
    "-ms-transition",
    "transition",
];

/// Style of the grid container element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerStyle {
    /// Height of the laid-out content; the container is otherwise relative and block.
    pub height: f32,
}

impl ContainerStyle {
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "relative".to_string()),
            ("display", "block".to_string()),
            ("height", format!("{}px", self.height)),
        ]
    }
}
