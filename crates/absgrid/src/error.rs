//! Configuration errors.

/// Rejected grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Item width or height is not a positive finite number.
    InvalidItemSize { width: f32, height: f32 },
    /// Zoom is not a positive finite number.
    InvalidZoom(f32),
    /// Vertical margin is negative but not the `-1` "derive" sentinel.
    InvalidVerticalMargin(f32),
    /// Container zoom is negative or not finite.
    InvalidContainerZoom(f32),
    /// `min_sort` is greater than `max_sort`.
    InvalidSortRange { min: f64, max: f64 },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidItemSize { width, height } => {
                write!(f, "Item size must be positive, got {}x{}", width, height)
            }
            GridError::InvalidZoom(zoom) => write!(f, "Zoom must be positive, got {}", zoom),
            GridError::InvalidVerticalMargin(margin) => {
                write!(f, "Vertical margin must be >= 0 or -1, got {}", margin)
            }
            GridError::InvalidContainerZoom(zoom) => {
                write!(f, "Container zoom must be >= 0, got {}", zoom)
            }
            GridError::InvalidSortRange { min, max } => {
                write!(f, "Sort range is empty: min {} > max {}", min, max)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Result type for grid configuration.
pub type GridResult<T> = Result<T, GridError>;
