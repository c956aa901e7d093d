use thiserror::Error;

/// Rejected layout or animation values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` needs at least one segment")]
    ZeroSegments { field: &'static str },

    #[error("flip duration must be longer than zero")]
    ZeroDuration,

    #[error("`{field}` must lie between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
