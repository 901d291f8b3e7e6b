//! Container width tracking.
//!
//! Resize signals are debounced; when the window settles a measurement is
//! requested, and the host answers it on its next frame with
//! [`ResizeObserver::apply_measurement`]. Layout therefore trails a resize or a
//! mount by one frame.

use std::time::Duration;

use crate::config::DEFAULT_RESIZE_DEBOUNCE;

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeObserver {
    debounce: Duration,
    /// Time left before a burst of resize signals is considered over.
    pending: Option<Duration>,
    measure_requested: bool,
    width: Option<f32>,
}

impl Default for ResizeObserver {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ResizeObserver {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
            measure_requested: false,
            width: None,
        }
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Last measured container width. `None` until the first measurement, or when
    /// the container could not be measured.
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Record a resize signal, restarting the debounce window.
    pub fn notify_resize(&mut self) {
        tracing::trace!(debounce = ?self.debounce, "resize signal");
        self.pending = Some(self.debounce);
    }

    /// Ask for a measurement on the next frame, skipping the debounce.
    pub fn request_measure(&mut self) {
        self.measure_requested = true;
    }

    pub fn needs_measure(&self) -> bool {
        self.measure_requested
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance the debounce window. Returns `true` while the observer still needs
    /// frames: a resize burst is settling or a measurement is outstanding.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(remaining) = self.pending {
            match remaining.checked_sub(dt) {
                Some(left) if !left.is_zero() => self.pending = Some(left),
                _ => {
                    self.pending = None;
                    self.measure_requested = true;
                }
            }
        }
        self.pending.is_some() || self.measure_requested
    }

    /// Answer an outstanding measurement request.
    ///
    /// Non-finite or negative widths count as unmeasurable. Returns `true` if the
    /// stored width changed. Without an outstanding request the measurement is
    /// dropped.
    pub fn apply_measurement(&mut self, width: Option<f32>) -> bool {
        if !self.measure_requested {
            tracing::trace!(?width, "measurement dropped, none requested");
            return false;
        }
        self.measure_requested = false;

        let width = width.filter(|w| w.is_finite() && *w >= 0.0);
        if width == self.width {
            return false;
        }
        tracing::debug!(from = ?self.width, to = ?width, "container width changed");
        self.width = width;
        true
    }

    /// Drop the pending debounce and any outstanding measurement.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.measure_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_initial_state() {
        let observer = ResizeObserver::default();
        assert_eq!(observer.width(), None);
        assert!(!observer.needs_measure());
        assert!(!observer.is_pending());
    }

    #[test]
    fn test_burst_is_coalesced() {
        let mut observer = ResizeObserver::default();
        observer.notify_resize();
        assert!(observer.tick(Duration::from_millis(100)));
        observer.notify_resize();
        assert!(observer.tick(Duration::from_millis(100)));
        assert!(!observer.needs_measure());

        assert!(observer.tick(Duration::from_millis(50)));
        assert!(!observer.is_pending());
        assert!(observer.needs_measure());
    }

    #[test]
    fn test_measurement_answers_request() {
        let mut observer = ResizeObserver::default();
        observer.request_measure();
        assert!(observer.apply_measurement(Some(640.0)));
        assert_eq!(observer.width(), Some(640.0));
        assert!(!observer.needs_measure());
        assert!(!observer.tick(FRAME));
    }

    #[test]
    fn test_unrequested_measurement_is_dropped() {
        let mut observer = ResizeObserver::default();
        assert!(!observer.apply_measurement(Some(640.0)));
        assert_eq!(observer.width(), None);
    }

    #[test]
    fn test_same_width_is_not_a_change() {
        let mut observer = ResizeObserver::default();
        observer.request_measure();
        observer.apply_measurement(Some(300.0));
        observer.request_measure();
        assert!(!observer.apply_measurement(Some(300.0)));
    }

    #[test]
    fn test_invalid_width_clears() {
        let mut observer = ResizeObserver::default();
        observer.request_measure();
        observer.apply_measurement(Some(300.0));
        observer.request_measure();
        assert!(observer.apply_measurement(Some(f32::NAN)));
        assert_eq!(observer.width(), None);
    }

    #[test]
    fn test_cancel_drops_everything_pending() {
        let mut observer = ResizeObserver::new(Duration::from_millis(10));
        observer.notify_resize();
        observer.request_measure();
        observer.cancel();
        assert!(!observer.tick(FRAME));
        assert!(!observer.needs_measure());
    }
}
