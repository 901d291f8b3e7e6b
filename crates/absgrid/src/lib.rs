//! Absgrid - absolutely positioned item grid with drag-to-reorder
//!
//! This crate lays out a collection of items on a grid inside a container of
//! changing width, without ever reordering the items themselves:
//! - Responsive column count and even margin distribution
//! - Sort-range and flag filtering into a dense slot index
//! - Pointer and touch drag sessions with live drop-target detection
//! - Ease-back styling after a drop
//! - Right-to-left layouts and zoom
//!
//! The host owns painting: every render pass returns one semantic [`ItemStyle`] per
//! item, which can be expanded into CSS with [`ItemStyle::css_declarations`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use absgrid::{GridConfig, GridController, Item};
//!
//! # fn main() -> absgrid::GridResult<()> {
//! let items: Vec<Item> = (0..12).map(|i| Item::new(i, i as f64)).collect();
//! let mut grid: GridController<Item> =
//!     GridController::new(GridConfig::new().item_size(96.0, 96.0).drag_enabled(true), ())?;
//!
//! grid.on_mount();
//! grid.apply_measurement(Some(640.0));
//!
//! // In the frame loop:
//! // grid.handle_grid_events(&mut event_batch);
//! for entry in grid.render(&items).items() {
//!     let _css = entry.style.css_declarations();
//! }
//! grid.tick(Duration::from_millis(16));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod display;
pub mod drag;
pub mod error;
pub mod index;
pub mod item;
pub mod layout;
pub mod resize;
pub mod style;

pub use config::{GridConfig, RenderPolicy, ThresholdPolicy};
pub use controller::{GridController, GridFrame, GridListener, ItemRender};
pub use display::ItemDisplay;
pub use drag::{DragListener, DragManager, DragPhase, DragUpdate, UpdateFn};
pub use error::{GridError, GridResult};
pub use hit_test::{ElementTree, ElementWalker, GridHitTester, HitTest, NoHitTest};
pub use index::FilteredIndex;
pub use item::{GridItem, Item, ItemKey};
pub use layout::{LayoutManager, LayoutOptions, LayoutState};
pub use style::{ContainerStyle, ItemStyle, Positioning, Transition};
