//! Validation errors surfaced to the user as destructive notifications.

use thiserror::Error;

/// The only error class the dashboard logic produces.
///
/// These never abort the process: the front-end turns them into a
/// destructive toast and leaves the prior state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("minimum nodes ({min}) cannot be greater than maximum nodes ({max})")]
    MinExceedsMax { min: u32, max: u32 },

    #[error("select at least one node pool")]
    EmptySelection,

    #[error("a time of day is required")]
    MissingTime,

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("select at least one day of the week")]
    NoDays,
}

impl ValidationError {
    /// Short title used for the notification header
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MinExceedsMax { .. } => "Invalid node bounds",
            _ => "Schedule validation failed",
        }
    }
}
