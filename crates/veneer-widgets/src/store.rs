//! Controlled and uncontrolled value ownership.
//!
//! A control either mirrors a value its owner supplies (controlled) or
//! keeps its own, seeded from a default (uncontrolled).  The mode is fixed
//! at construction.

/// Where a control's canonical value lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueStore<T> {
    /// The owner supplies the value; selections only notify.
    Controlled(Option<T>),
    /// The control keeps the last committed value.
    Uncontrolled(Option<T>),
}

impl<T> Default for ValueStore<T> {
    fn default() -> Self {
        ValueStore::Uncontrolled(None)
    }
}

impl<T: Clone> ValueStore<T> {
    pub fn controlled(value: Option<T>) -> Self {
        ValueStore::Controlled(value)
    }

    pub fn uncontrolled(default: Option<T>) -> Self {
        ValueStore::Uncontrolled(default)
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, ValueStore::Controlled(_))
    }

    /// The value the display is derived from.
    pub fn current(&self) -> Option<&T> {
        match self {
            ValueStore::Controlled(v) | ValueStore::Uncontrolled(v) => v.as_ref(),
        }
    }

    /// Record a user selection.  Returns the value to notify with.
    ///
    /// Uncontrolled stores keep it; controlled stores leave the display
    /// alone until the owner calls [`set_external`](Self::set_external).
    pub fn commit(&mut self, value: Option<T>) -> Option<T> {
        if let ValueStore::Uncontrolled(current) = self {
            *current = value.clone();
        }
        value
    }

    /// Replace a controlled value.  Ignored, with a warning, on an
    /// uncontrolled store.
    pub fn set_external(&mut self, value: Option<T>) -> bool {
        match self {
            ValueStore::Controlled(current) => {
                *current = value;
                true
            }
            ValueStore::Uncontrolled(_) => {
                tracing::warn!("external value ignored by uncontrolled control");
                false
            }
        }
    }
}
