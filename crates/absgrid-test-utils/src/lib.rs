//! Test utilities for absgrid.
//!
//! - [`MockElementTree`] - an in-memory element tree for hit-testing through
//!   [`absgrid::ElementWalker`]
//! - [`RecordingListener`] - a grid listener that records every notification
//!
//! Both use `parking_lot::Mutex` so they can be queried through `&self` while a
//! controller owns a clone.
//!
//! # Example
//!
//! ```rust
//! use absgrid::{GridConfig, GridController, Item};
//! use absgrid_test_utils::{ListenerCall, RecordingListener};
//!
//! let listener = RecordingListener::new();
//! let mut grid: GridController<Item, _> =
//!     GridController::new(GridConfig::new(), listener.clone()).unwrap();
//! grid.force_resize();
//!
//! assert_eq!(listener.calls(), vec![ListenerCall::ForceResizeDone]);
//! ```

pub mod element_tree;
pub mod listener;

pub use element_tree::{MockElement, MockElementTree};
pub use listener::{ListenerCall, RecordingListener};
