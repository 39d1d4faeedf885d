//! Result type for operations that recover from transport failures.

use heroes_core::TransportError;

/// Outcome of a data-access operation.
///
/// Every operation resolves to a usable value: either the backend answered,
/// or the transport failed and the configured fallback was substituted. The
/// error that triggered the substitution rides along for callers that want
/// to distinguish the two; callers that don't simply take
/// [`into_value`](Recovered::into_value) and never branch on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovered<T> {
    /// The operation completed against the backend.
    Ok(T),

    /// The transport failed; `value` is the fallback configured for the
    /// operation.
    Fallback {
        /// The substituted value.
        value: T,
        /// The failure that was recovered from.
        error: TransportError,
    },
}

impl<T> Recovered<T> {
    /// Returns the value, whether fetched or substituted.
    pub fn into_value(self) -> T {
        match self {
            Self::Ok(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Returns a reference to the value.
    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Returns `true` if the backend answered.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` if the value is a substituted fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Returns the recovered-from error, if any.
    pub fn error(&self) -> Option<&TransportError> {
        match self {
            Self::Ok(_) => None,
            Self::Fallback { error, .. } => Some(error),
        }
    }

    /// Maps the value while preserving the outcome.
    pub fn map<U, F>(self, f: F) -> Recovered<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Recovered::Ok(f(value)),
            Self::Fallback { value, error } => Recovered::Fallback {
                value: f(value),
                error,
            },
        }
    }
}
