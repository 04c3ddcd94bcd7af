//! Error types for veneer-widgets.
//!
//! Nothing here is surfaced to a control's caller: controls recover
//! locally (placeholder, reverted text, fallback display) and log.  The
//! types exist so the adapters can report *why* a value was rejected.

use thiserror::Error;
use veneer_core::ViewportClass;

/// Result alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the value adapters and the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An implementation could not be acquired.
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    /// Text that is not a `HH:mm` / `HH:mm:ss` time of day.
    #[error("Invalid time: {0:?}")]
    InvalidTime(String),

    /// Text that is not a `yyyy-MM-dd HH:mm[:ss]` date-time.
    #[error("Invalid date-time: {0:?}")]
    InvalidDateTime(String),

    /// Two options share a value.
    #[error("Duplicate option value: {0:?}")]
    DuplicateOption(String),
}

/// Failure to acquire a widget implementation for a viewport class.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    /// The implementation for `class` could not be set up.
    #[error("{class} implementation unavailable: {reason}")]
    Unavailable {
        /// The class whose implementation failed.
        class: ViewportClass,
        /// Loader-supplied reason.
        reason: String,
    },
}

impl AcquireError {
    /// Shorthand for [`AcquireError::Unavailable`].
    pub fn unavailable(class: ViewportClass, reason: impl Into<String>) -> Self {
        AcquireError::Unavailable {
            class,
            reason: reason.into(),
        }
    }
}
