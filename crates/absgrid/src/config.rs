//! Grid configuration.

use std::time::Duration;

use crate::error::{GridError, GridResult};
use crate::layout::LayoutOptions;

/// Sentinel for [`GridConfig::vertical_margin`]: use the computed horizontal margin.
pub const AUTO_VERTICAL_MARGIN: f32 = -1.0;

/// Pixel tolerance carried over from the pointer-drag heuristics.
pub const DEFAULT_DRAG_TOLERANCE: f32 = 3.0;

/// Debounce window applied to host resize signals.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Scale between pointer and grid coordinates; unset or `0` means unscaled.
pub fn effective_zoom(container_zoom: Option<f32>) -> f32 {
    match container_zoom {
        Some(zoom) if zoom != 0.0 => zoom,
        _ => 1.0,
    }
}

/// Whether a pointer move must travel before a drag counts as started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ThresholdPolicy {
    /// Every move starts the drag, however small.
    #[default]
    Bypass,
    /// Moves within this many pixels (per axis) of the press are ignored.
    Honor(f32),
}

/// Whether unchanged items are reported as needing a re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Skip items whose derived render key matches the previous pass.
    #[default]
    SkipUnchanged,
    /// Report every item as changed on every pass.
    Always,
}

/// Configuration for a [`GridController`](crate::GridController).
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub item_width: f32,
    pub item_height: f32,
    /// [`AUTO_VERTICAL_MARGIN`] or a fixed margin in pixels.
    pub vertical_margin: f32,
    pub zoom: f32,
    pub rtl: bool,
    /// Items with `min_sort <= sort < max_sort` are rendered. Either bound unset
    /// disables the range filter.
    pub min_sort: Option<f64>,
    pub max_sort: Option<f64>,
    /// Transition applied to slot changes; `None` disables transitions.
    pub animation: Option<String>,
    pub drag_enabled: bool,
    /// Re-measure the container when the host window resizes.
    pub responsive: bool,
    /// Scale between pointer coordinates and grid coordinates; `None` or `0` means `1`.
    pub container_zoom: Option<f32>,
    pub render_policy: RenderPolicy,
    pub drag_threshold: ThresholdPolicy,
    pub resize_debounce: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            item_width: 128.0,
            item_height: 128.0,
            vertical_margin: AUTO_VERTICAL_MARGIN,
            zoom: 1.0,
            rtl: false,
            min_sort: Some(0.0),
            max_sort: Some(9999.0),
            animation: Some("transform 300ms ease".to_string()),
            drag_enabled: false,
            responsive: false,
            container_zoom: None,
            render_policy: RenderPolicy::default(),
            drag_threshold: ThresholdPolicy::default(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_size(mut self, width: f32, height: f32) -> Self {
        self.item_width = width;
        self.item_height = height;
        self
    }

    pub fn vertical_margin(mut self, margin: f32) -> Self {
        self.vertical_margin = margin;
        self
    }

    pub fn zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn sort_range(mut self, min: f64, max: f64) -> Self {
        self.min_sort = Some(min);
        self.max_sort = Some(max);
        self
    }

    pub fn unbounded_sort(mut self) -> Self {
        self.min_sort = None;
        self.max_sort = None;
        self
    }

    pub fn animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    pub fn no_animation(mut self) -> Self {
        self.animation = None;
        self
    }

    pub fn drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    pub fn responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    pub fn container_zoom(mut self, zoom: f32) -> Self {
        self.container_zoom = Some(zoom);
        self
    }

    pub fn render_policy(mut self, policy: RenderPolicy) -> Self {
        self.render_policy = policy;
        self
    }

    pub fn drag_threshold(mut self, policy: ThresholdPolicy) -> Self {
        self.drag_threshold = policy;
        self
    }

    pub fn resize_debounce(mut self, debounce: Duration) -> Self {
        self.resize_debounce = debounce;
        self
    }

    /// Check the invariants the layout math relies on.
    pub fn validate(&self) -> GridResult<()> {
        let size_ok = |v: f32| v.is_finite() && v > 0.0;
        if !size_ok(self.item_width) || !size_ok(self.item_height) {
            return Err(GridError::InvalidItemSize {
                width: self.item_width,
                height: self.item_height,
            });
        }
        if !size_ok(self.zoom) {
            return Err(GridError::InvalidZoom(self.zoom));
        }
        if !self.vertical_margin.is_finite()
            || (self.vertical_margin < 0.0 && self.vertical_margin != AUTO_VERTICAL_MARGIN)
        {
            return Err(GridError::InvalidVerticalMargin(self.vertical_margin));
        }
        if let Some(zoom) = self.container_zoom
            && (!zoom.is_finite() || zoom < 0.0)
        {
            return Err(GridError::InvalidContainerZoom(zoom));
        }
        if let (Some(min), Some(max)) = (self.min_sort, self.max_sort)
            && min > max
        {
            return Err(GridError::InvalidSortRange { min, max });
        }
        Ok(())
    }

    /// Geometry inputs for a [`LayoutManager`](crate::LayoutManager).
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            item_width: self.item_width,
            item_height: self.item_height,
            vertical_margin: (self.vertical_margin != AUTO_VERTICAL_MARGIN)
                .then_some(self.vertical_margin),
            zoom: self.zoom,
        }
    }

    /// Half-open sort range, if both bounds are set.
    pub fn sort_bounds(&self) -> Option<(f64, f64)> {
        self.min_sort.zip(self.max_sort)
    }
}
