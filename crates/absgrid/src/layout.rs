//! Grid geometry: column count, margins and per-index slot positions.
//!
//! A [`LayoutManager`] holds only the values of its last [`configure`] call, so a
//! fresh one can be built for every render pass without carrying stale state.
//!
//! [`configure`]: LayoutManager::configure

use absgrid_core::geometry::{Rect, Size};
use absgrid_core::math::{Vec2, round_px};

use crate::style::{FLOATING_Z_INDEX, ItemStyle, Positioning, RELEASE_TRANSITION, Transition};

/// Geometry inputs for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub item_width: f32,
    pub item_height: f32,
    /// `None` derives the vertical margin from the horizontal one.
    pub vertical_margin: Option<f32>,
    pub zoom: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            item_width: 128.0,
            item_height: 128.0,
            vertical_margin: None,
            zoom: 1.0,
        }
    }
}

/// Derived layout values, recomputed by every [`LayoutManager::configure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Always at least 1.
    pub columns: usize,
    pub horizontal_margin: f32,
    pub vertical_margin: f32,
    /// `item_height + vertical_margin`.
    pub row_height: f32,
    /// Item width after zoom, in whole pixels.
    pub item_width: f32,
    /// Item height after zoom, in whole pixels.
    pub item_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutManager {
    state: LayoutState,
    container_width: f32,
    rtl: bool,
}

impl LayoutManager {
    pub fn new(options: &LayoutOptions, container_width: f32, rtl: bool) -> Self {
        let mut layout = Self {
            state: LayoutState {
                columns: 1,
                horizontal_margin: 0.0,
                vertical_margin: 0.0,
                row_height: 0.0,
                item_width: 0.0,
                item_height: 0.0,
            },
            container_width,
            rtl,
        };
        layout.configure(options, container_width, rtl);
        layout
    }

    /// Recompute the layout state for a container width.
    ///
    /// Item sizes are scaled by zoom and rounded to whole pixels before the column
    /// math. Leftover width is spread evenly between columns.
    pub fn configure(&mut self, options: &LayoutOptions, container_width: f32, rtl: bool) {
        // A zero-width item would make the column count infinite
        let item_width = round_px(options.item_width * options.zoom).max(1.0);
        let item_height = round_px(options.item_height * options.zoom).max(1.0);

        let columns = (container_width / item_width).floor().max(1.0) as usize;
        let horizontal_margin = if columns == 1 {
            0.0
        } else {
            round_px(container_width - columns as f32 * item_width) / (columns - 1) as f32
        };
        let vertical_margin = options.vertical_margin.unwrap_or(horizontal_margin);

        self.state = LayoutState {
            columns,
            horizontal_margin,
            vertical_margin,
            row_height: item_height + vertical_margin,
            item_width,
            item_height,
        };
        self.container_width = container_width;
        self.rtl = rtl;
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn columns(&self) -> usize {
        self.state.columns
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    pub fn item_size(&self) -> Size<f32> {
        Size::new(self.state.item_width, self.state.item_height)
    }

    /// Height of `count` laid-out items. The last row carries no trailing margin.
    pub fn total_height(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let rows = count.div_ceil(self.state.columns);
        rows as f32 * self.state.row_height - self.state.vertical_margin
    }

    pub fn row(&self, index: usize) -> usize {
        index / self.state.columns
    }

    /// Column as laid out on screen, mirrored under right-to-left.
    pub fn column(&self, index: usize) -> usize {
        let column = index % self.state.columns;
        if self.rtl {
            self.state.columns - 1 - column
        } else {
            column
        }
    }

    /// Top-left corner of the slot at `index`, offset by `origin`.
    pub fn position_of(&self, index: usize, origin: Vec2) -> Vec2 {
        let column = self.column(index) as f32;
        let row = self.row(index) as f32;
        Vec2::new(
            round_px(column * self.state.item_width + column * self.state.horizontal_margin)
                + origin.x,
            round_px(row * self.state.row_height) + origin.y,
        )
    }

    /// Rectangle of the slot at `index`, offset by `origin`.
    pub fn slot_rect(&self, index: usize, origin: Vec2) -> Rect<f32> {
        let pos = self.position_of(index, origin);
        Rect::new(pos.x, pos.y, self.state.item_width, self.state.item_height)
    }

    /// Index of the slot containing `point`, or `None` over a margin or outside
    /// the grid. Rows below the last item are not bounded here.
    pub fn index_at(&self, point: Vec2, origin: Vec2) -> Option<usize> {
        let local = point - origin;
        if local.x < 0.0 || local.y < 0.0 || local.x > self.container_width {
            return None;
        }

        let row = (local.y / self.state.row_height).floor() as usize;
        let column_stride = self.state.item_width + self.state.horizontal_margin;
        let screen_column = ((local.x / column_stride).floor() as usize).min(self.state.columns - 1);
        let column = if self.rtl {
            self.state.columns - 1 - screen_column
        } else {
            screen_column
        };

        // far-off points saturate the casts above
        let index = row.checked_mul(self.state.columns)?.checked_add(column)?;
        self.slot_rect(index, origin).contains(point).then_some(index)
    }

    /// In-flow style for the slot at `index`.
    pub fn style_for(&self, index: usize, animation: Option<&str>, is_filtered: bool) -> ItemStyle {
        ItemStyle {
            positioning: Some(Positioning::Absolute),
            size: Some(self.item_size()),
            translate: Some(self.position_of(index, Vec2::ZERO)),
            visible: !is_filtered,
            transition: animation.map(|spec| Transition::Animate(spec.to_string())),
            z_index: None,
            pinned: false,
            pointer_events: true,
        }
    }

    /// Viewport-fixed style used while a released item eases into its slot.
    ///
    /// `origin` is the grid container's on-screen position. The transition is always
    /// [`RELEASE_TRANSITION`], whatever animation the grid uses, so the ease-back length
    /// matches the release timer.
    pub fn style_for_release(
        &self,
        index: usize,
        _animation: Option<&str>,
        is_filtered: bool,
        origin: Vec2,
    ) -> ItemStyle {
        ItemStyle {
            positioning: Some(Positioning::Fixed),
            size: Some(self.item_size()),
            translate: Some(self.position_of(index, origin)),
            visible: !is_filtered,
            transition: Some(Transition::Animate(RELEASE_TRANSITION.to_string())),
            z_index: Some(FLOATING_Z_INDEX),
            pinned: true,
            pointer_events: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(width: f32, height: f32) -> LayoutOptions {
        LayoutOptions {
            item_width: width,
            item_height: height,
            vertical_margin: None,
            zoom: 1.0,
        }
    }

    #[test]
    fn test_exact_fit_scenario() {
        let layout = LayoutManager::new(&options(100.0, 100.0), 400.0, false);
        assert_eq!(layout.columns(), 4);
        assert_eq!(layout.state().horizontal_margin, 0.0);
        assert_eq!(layout.row(4), 1);
        assert_eq!(layout.column(4), 0);
        assert_eq!(layout.position_of(4, Vec2::ZERO), Vec2::new(0.0, layout.state().row_height));
    }

    #[test]
    fn test_leftover_width_becomes_margin() {
        // 3 columns of 100 in 330 leaves 30 split over 2 gaps
        let layout = LayoutManager::new(&options(100.0, 50.0), 330.0, false);
        assert_eq!(layout.columns(), 3);
        assert_eq!(layout.state().horizontal_margin, 15.0);
        assert_eq!(layout.state().vertical_margin, 15.0);
        assert_eq!(layout.state().row_height, 65.0);
        assert_eq!(layout.position_of(2, Vec2::ZERO), Vec2::new(230.0, 0.0));
        assert_eq!(layout.position_of(5, Vec2::new(10.0, 20.0)), Vec2::new(240.0, 85.0));
    }

    #[test]
    fn test_fixed_vertical_margin() {
        let mut opts = options(100.0, 50.0);
        opts.vertical_margin = Some(4.0);
        let layout = LayoutManager::new(&opts, 330.0, false);
        assert_eq!(layout.state().horizontal_margin, 15.0);
        assert_eq!(layout.state().vertical_margin, 4.0);
        assert_eq!(layout.state().row_height, 54.0);
    }

    #[test]
    fn test_narrow_container_clamps_to_one_column() {
        let layout = LayoutManager::new(&options(128.0, 128.0), 50.0, false);
        assert_eq!(layout.columns(), 1);
        assert_eq!(layout.state().horizontal_margin, 0.0);
        assert_eq!(layout.position_of(3, Vec2::ZERO), Vec2::new(0.0, 384.0));
    }

    #[test]
    fn test_zoom_rounds_item_size() {
        let mut opts = options(100.0, 75.0);
        opts.zoom = 1.25;
        let layout = LayoutManager::new(&opts, 500.0, false);
        assert_eq!(layout.item_size(), Size::new(125.0, 94.0));
        assert_eq!(layout.columns(), 4);
    }

    #[test]
    fn test_total_height() {
        let layout = LayoutManager::new(&options(100.0, 50.0), 330.0, false);
        assert_eq!(layout.total_height(0), 0.0);
        assert_eq!(layout.total_height(1), 50.0);
        assert_eq!(layout.total_height(3), 50.0);
        assert_eq!(layout.total_height(6), 2.0 * 65.0 - 15.0);
        assert_eq!(layout.total_height(7), 3.0 * 65.0 - 15.0);
    }

    #[test]
    fn test_rtl_mirrors_columns() {
        let layout = LayoutManager::new(&options(100.0, 100.0), 400.0, true);
        assert_eq!(layout.position_of(0, Vec2::ZERO).x, 300.0);
        assert_eq!(layout.position_of(3, Vec2::ZERO).x, 0.0);
        assert_eq!(layout.position_of(4, Vec2::ZERO), Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_configure_is_idempotent() {
        let opts = options(90.0, 60.0);
        let mut layout = LayoutManager::new(&opts, 500.0, false);
        let first = *layout.state();
        layout.configure(&opts, 500.0, false);
        assert_eq!(*layout.state(), first);
    }

    #[test]
    fn test_configure_overwrites_previous_state() {
        let mut layout = LayoutManager::new(&options(100.0, 100.0), 400.0, true);
        layout.configure(&options(50.0, 50.0), 120.0, false);
        assert_eq!(layout.columns(), 2);
        assert!(!layout.is_rtl());
        assert_eq!(layout.state().horizontal_margin, 20.0);
    }

    #[test]
    fn test_index_at() {
        let layout = LayoutManager::new(&options(100.0, 50.0), 330.0, false);
        let origin = Vec2::new(10.0, 10.0);
        assert_eq!(layout.index_at(Vec2::new(15.0, 15.0), origin), Some(0));
        assert_eq!(layout.index_at(Vec2::new(250.0, 80.0), origin), Some(5));
        // Horizontal margin between columns 0 and 1
        assert_eq!(layout.index_at(Vec2::new(118.0, 15.0), origin), None);
        // Vertical margin between rows
        assert_eq!(layout.index_at(Vec2::new(15.0, 70.0), origin), None);
        assert_eq!(layout.index_at(Vec2::new(5.0, 15.0), origin), None);
    }

    #[test]
    fn test_index_at_far_away_point() {
        let layout = LayoutManager::new(&options(100.0, 100.0), 400.0, false);
        assert_eq!(layout.index_at(Vec2::new(50.0, f32::MAX), Vec2::ZERO), None);
        assert_eq!(layout.index_at(Vec2::new(350.0, 1e30), Vec2::ZERO), None);
    }

    #[test]
    fn test_index_at_rtl() {
        let layout = LayoutManager::new(&options(100.0, 100.0), 400.0, true);
        assert_eq!(layout.index_at(Vec2::new(350.0, 50.0), Vec2::ZERO), Some(0));
        assert_eq!(layout.index_at(Vec2::new(50.0, 150.0), Vec2::ZERO), Some(7));
    }

    #[test]
    fn test_style_for() {
        let layout = LayoutManager::new(&options(100.0, 100.0), 400.0, false);
        let style = layout.style_for(5, Some("transform 300ms ease"), false);
        assert_eq!(style.positioning, Some(Positioning::Absolute));
        assert_eq!(style.translate, Some(Vec2::new(100.0, 100.0)));
        assert!(style.visible);
        assert_eq!(
            style.transition,
            Some(Transition::Animate("transform 300ms ease".to_string()))
        );

        let filtered = layout.style_for(5, None, true);
        assert!(!filtered.visible);
        assert_eq!(filtered.transition, None);
    }

    #[test]
    fn test_release_style_ignores_caller_animation() {
        let layout = LayoutManager::new(&options(100.0, 100.0), 400.0, false);
        let style = layout.style_for_release(1, Some("transform 2s linear"), false, Vec2::new(20.0, 30.0));
        assert_eq!(style.positioning, Some(Positioning::Fixed));
        assert_eq!(style.translate, Some(Vec2::new(120.0, 30.0)));
        assert_eq!(
            style.transition,
            Some(Transition::Animate(RELEASE_TRANSITION.to_string()))
        );
        assert_eq!(style.z_index, Some(FLOATING_Z_INDEX));
        assert!(style.pinned);
    }
}
