//! Per-frame orchestration of layout, filtering and the shared drag session.
//!
//! The controller owns everything that outlives a render pass: the drag
//! session, the observed container width and each item's ease-back state. The
//! layout itself is rebuilt from scratch on every [`GridController::render`].
//!
//! A host drives it roughly like this:
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use absgrid::{GridConfig, GridController, GridFrame, Item};
//! use absgrid_input::EventBatch;
//!
//! # fn measure() -> Option<f32> { Some(800.0) }
//! # fn paint(_frame: &GridFrame<'_, Item>) {}
//! # fn main() -> absgrid::GridResult<()> {
//! let items = vec![Item::new(1, 0.0), Item::new(2, 1.0)];
//! let mut grid: GridController<Item> = GridController::new(GridConfig::new().drag_enabled(true), ())?;
//! grid.on_mount();
//!
//! // every frame
//! let mut events = EventBatch::default();
//! if grid.needs_measure() {
//!     grid.apply_measurement(measure());
//! }
//! grid.handle_grid_events(&mut events);
//! paint(&grid.render(&items));
//! grid.tick(Duration::from_millis(16));
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use absgrid_core::alloc::HashSet;
use absgrid_core::geometry::Rect;
use absgrid_core::math::Vec2;
use absgrid_core::profiling::profile_function;
use absgrid_input::{Event, EventBatch, HandleStatus, PointerEvent};
use indexmap::IndexMap;

use crate::config::{GridConfig, RenderPolicy};
use crate::display::{ItemDisplay, StyleContext};
use crate::drag::{DragListener, DragManager, DragPhase, DragUpdate};
use crate::error::GridResult;
use crate::hit_test::{GridHitTester, HitTest, NoHitTest};
use crate::index::{FilteredIndex, in_sort_range};
use crate::item::{GridItem, ItemKey};
use crate::layout::LayoutManager;
use crate::resize::ResizeObserver;
use crate::style::{ContainerStyle, ItemStyle};

/// Host callbacks: the drag notifications plus grid-level events.
pub trait GridListener<T>: DragListener<T> {
    /// A [`GridController::force_resize`] request has been scheduled.
    fn on_force_resize_done(&mut self) {}
}

impl<T> GridListener<T> for () {}

/// Output of one render pass.
#[derive(Debug)]
pub enum GridFrame<'a, T> {
    /// No width yet, or nothing to show: render a bare anchor element.
    Empty,
    Grid {
        container: ContainerStyle,
        /// One entry per item inside the sort range, in input order.
        items: Vec<ItemRender<'a, T>>,
    },
}

impl<'a, T> GridFrame<'a, T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, GridFrame::Empty)
    }

    pub fn items(&self) -> &[ItemRender<'a, T>] {
        match self {
            GridFrame::Empty => &[],
            GridFrame::Grid { items, .. } => items,
        }
    }

    pub fn container(&self) -> Option<&ContainerStyle> {
        match self {
            GridFrame::Empty => None,
            GridFrame::Grid { container, .. } => Some(container),
        }
    }
}

/// Everything the host needs to draw one item.
#[derive(Debug)]
pub struct ItemRender<'a, T> {
    pub item: &'a T,
    pub key: ItemKey,
    /// Dense slot index; `None` for filtered items.
    pub index: Option<usize>,
    /// Number of items inside the sort range.
    pub item_count: usize,
    pub style: ItemStyle,
    /// The host may call [`GridController::begin_drag`] for this item.
    pub draggable: bool,
    /// Differs from the previous pass, or the render policy asks for every item.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    index: Option<usize>,
    item_count: usize,
    style: ItemStyle,
}

#[derive(Debug, Default)]
struct ItemSlot {
    display: Rc<RefCell<ItemDisplay>>,
    last: Option<RenderKey>,
}

pub struct GridController<T, L = ()> {
    config: GridConfig,
    drag: DragManager<T, L>,
    resize: ResizeObserver,
    displays: IndexMap<ItemKey, ItemSlot>,
    /// Layout and slot order of the last non-empty pass, used for hit-testing.
    layout: Option<LayoutManager>,
    slots: Vec<ItemKey>,
    container_origin: Vec2,
    mounted: bool,
}

impl<T: GridItem + Clone, L: GridListener<T>> GridController<T, L> {
    pub fn new(config: GridConfig, listener: L) -> GridResult<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "rejected grid configuration");
            return Err(err);
        }

        Ok(Self {
            drag: DragManager::new(listener).with_threshold(config.drag_threshold),
            resize: ResizeObserver::new(config.resize_debounce),
            config,
            displays: IndexMap::new(),
            layout: None,
            slots: Vec::new(),
            container_origin: Vec2::ZERO,
            mounted: false,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration. The current one is kept if `config` is invalid.
    pub fn set_config(&mut self, config: GridConfig) -> GridResult<()> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "rejected grid configuration");
            return Err(err);
        }
        self.drag.set_threshold(config.drag_threshold);
        self.resize.set_debounce(config.resize_debounce);
        self.config = config;
        Ok(())
    }

    pub fn listener(&self) -> &L {
        self.drag.listener()
    }

    pub fn listener_mut(&mut self) -> &mut L {
        self.drag.listener_mut()
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn dragged_item(&self) -> Option<&T> {
        self.drag.dragged_item()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Container attached: measure its width on the next frame.
    pub fn on_mount(&mut self) {
        tracing::debug!("grid mounted");
        self.mounted = true;
        self.resize.request_measure();
    }

    /// Container detached: end any drag and drop pending measurements.
    pub fn unmount(&mut self) {
        tracing::debug!(dragging = self.drag.is_listening(), "grid unmounted");
        self.drag.cancel();
        self.resize.cancel();
        self.displays.clear();
        self.layout = None;
        self.slots.clear();
        self.mounted = false;
    }

    /// Re-measure the container now instead of waiting for a resize signal.
    pub fn force_resize(&mut self) {
        self.resize.request_measure();
        self.drag.listener_mut().on_force_resize_done();
    }

    pub fn needs_measure(&self) -> bool {
        self.mounted && self.resize.needs_measure()
    }

    /// Answer a measurement request with the container's current width.
    /// Returns `true` if the width changed.
    pub fn apply_measurement(&mut self, width: Option<f32>) -> bool {
        if !self.mounted {
            return false;
        }
        self.resize.apply_measurement(width)
    }

    pub fn container_width(&self) -> Option<f32> {
        self.resize.width()
    }

    /// Screen position of the container, used by the release style and by
    /// geometric hit-testing.
    pub fn set_container_origin(&mut self, origin: Vec2) {
        self.container_origin = origin;
    }

    pub fn container_origin(&self) -> Vec2 {
        self.container_origin
    }

    /// Layout of the last non-empty render pass.
    pub fn layout(&self) -> Option<&LayoutManager> {
        self.layout.as_ref()
    }

    /// Advance timers by `dt`.
    ///
    /// Returns `true` while another frame is needed: an item is easing back, a
    /// resize is settling or a measurement is outstanding.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for slot in self.displays.values() {
            animating |= slot.display.borrow_mut().tick(dt);
        }
        let resizing = self.mounted && self.resize.tick(dt);
        animating || resizing
    }

    /// Arm a drag for `item`, pressed by `event` with its element at `anchor`.
    ///
    /// Ignored when dragging is disabled or the item is disabled.
    pub fn begin_drag(&mut self, item: &T, anchor: Rect<f32>, event: &PointerEvent) -> HandleStatus {
        if !self.config.drag_enabled || item.is_disabled() {
            return HandleStatus::ignored();
        }

        let display = Rc::clone(&self.displays.entry(item.key()).or_default().display);
        let on_update = Box::new(move |update: DragUpdate| display.borrow_mut().apply_update(update));
        self.drag
            .start_drag(event, anchor, item.clone(), on_update, self.config.container_zoom)
    }

    /// Route a frame's events: window resizes to the resize observer when
    /// responsive, pointer events to the drag session using `hit` for drop targets.
    pub fn handle_events(&mut self, events: &mut EventBatch, hit: &dyn HitTest) {
        self.route_resize(events);
        self.drag.handle_events(events, hit);
    }

    /// [`handle_events`](Self::handle_events) with drop targets resolved from the
    /// last layout pass.
    pub fn handle_grid_events(&mut self, events: &mut EventBatch) {
        self.route_resize(events);
        match &self.layout {
            Some(layout) => {
                let hit = GridHitTester::new(layout, self.container_origin, &self.slots)
                    .with_zoom(self.config.container_zoom);
                self.drag.handle_events(events, &hit);
            }
            None => self.drag.handle_events(events, &NoHitTest),
        }
    }

    fn route_resize(&mut self, events: &mut EventBatch) {
        if !self.config.responsive {
            return;
        }
        let resize = &mut self.resize;
        events.dispatch(|event| match event {
            Event::WindowResized(_) => {
                resize.notify_resize();
                HandleStatus::handled()
            }
            _ => HandleStatus::ignored(),
        });
    }

    /// Lay out `items` for the current width.
    pub fn render<'a>(&mut self, items: &'a [T]) -> GridFrame<'a, T> {
        profile_function!();

        let width = self.resize.width().filter(|w| *w > 0.0);
        let Some(width) = width.filter(|_| !items.is_empty()) else {
            tracing::trace!(?width, items = items.len(), "empty grid");
            self.layout = None;
            self.slots.clear();
            return GridFrame::Empty;
        };

        let layout = LayoutManager::new(&self.config.layout_options(), width, self.config.rtl);
        let range = self.config.sort_bounds();
        let index = FilteredIndex::build(items, range);
        let visible: Vec<&'a T> = items.iter().filter(|item| in_sort_range(*item, range)).collect();
        let item_count = visible.len();
        let animation = self.config.animation.as_deref();

        let mut seen = HashSet::with_capacity(item_count);
        let mut rendered = Vec::with_capacity(item_count);
        for item in visible {
            let key = item.key();
            let slot_index = index.index_of(&key);
            let dragged = self.drag.is_dragging(&key);
            let slot = self.displays.entry(key.clone()).or_default();

            let style = slot.display.borrow().style(&StyleContext {
                layout: &layout,
                index: slot_index,
                animation,
                filtered: item.is_filtered(),
                disabled: item.is_disabled(),
                dragged,
                container_origin: self.container_origin,
            });

            let render_key = RenderKey {
                index: slot_index,
                item_count,
                style: style.clone(),
            };
            let changed = match self.config.render_policy {
                RenderPolicy::Always => true,
                RenderPolicy::SkipUnchanged => slot.last.as_ref() != Some(&render_key),
            };
            slot.last = Some(render_key);

            rendered.push(ItemRender {
                item,
                draggable: self.config.drag_enabled && !item.is_disabled(),
                key: key.clone(),
                index: slot_index,
                item_count,
                style,
                changed,
            });
            seen.insert(key);
        }

        // the dragged item keeps its state even if it left the range mid-drag
        let drag = &self.drag;
        self.displays
            .retain(|key, _| seen.contains(key) || drag.is_dragging(key));

        let container = ContainerStyle {
            height: layout.total_height(index.len()),
        };
        self.slots = index.slots().to_vec();
        self.layout = Some(layout);

        GridFrame::Grid {
            container,
            items: rendered,
        }
    }
}

impl<T, L: std::fmt::Debug> std::fmt::Debug for GridController<T, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("config", &self.config)
            .field("drag", &self.drag)
            .field("resize", &self.resize)
            .field("items", &self.displays.len())
            .field("mounted", &self.mounted)
            .finish()
    }
}
