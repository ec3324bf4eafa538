//! Loading/success/error state for values fetched from the API.

use crate::error::BookingError;

/// The state of an asynchronously loaded value.
///
/// Consumers match on all three variants; there is no "idle" variant, an
/// absent resource is modelled as `Option<Resource<T>>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource<T> {
    /// A request is outstanding
    Loading,
    /// The request completed with a value
    Success(T),
    /// The request failed
    Error(BookingError),
}

impl<T> Resource<T> {
    /// Returns true while loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The value, if loaded
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Loading | Self::Error(_) => None,
        }
    }

    /// The error, if failed
    #[must_use]
    pub const fn error(&self) -> Option<&BookingError> {
        match self {
            Self::Error(error) => Some(error),
            Self::Loading | Self::Success(_) => None,
        }
    }

    /// Maps the loaded value
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Self::Loading => Resource::Loading,
            Self::Success(value) => Resource::Success(f(value)),
            Self::Error(error) => Resource::Error(error),
        }
    }
}

impl<T> From<Result<T, BookingError>> for Resource<T> {
    fn from(result: Result<T, BookingError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_from_result() {
        let ok: Resource<u32> = Ok(3).into();
        assert_eq!(ok.value(), Some(&3));
        assert!(!ok.is_loading());

        let err: Resource<u32> = Err(BookingError::from_kind(ErrorKind::NotFound)).into();
        assert_eq!(err.error().map(BookingError::kind), Some(ErrorKind::NotFound));
        assert_eq!(err.value(), None);
    }

    #[test]
    fn test_map_preserves_variant() {
        let loading: Resource<u32> = Resource::Loading;
        assert!(loading.map(|v| v * 2).is_loading());
        assert_eq!(Resource::Success(2).map(|v| v * 2), Resource::Success(4));
    }
}
