//! Typed comparison of value objects against values of unknown type.
//!
//! Same-type comparisons use the ordinary `==` and `<` operators. When the
//! other side is only known as `&dyn Any`, [`TryCompare`] reports a
//! [`TypeMismatchError`] instead of answering `false`.
//!
//! # Examples
//!
//! ```
//! use photon_core::{TagFilter, TryCompare};
//!
//! let filter = TagFilter::key("highway")?;
//! assert!(filter.try_eq(&filter.clone()).is_ok_and(|equal| equal));
//! assert!(filter.try_eq(&"highway").is_err());
//! # Ok::<(), photon_core::TagFilterError>(())
//! ```

use std::any::{Any, type_name};
use std::cmp::Ordering;

use thiserror::Error;

/// Raised when a value object is compared with a value of another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot compare {expected} with a value of a different type")]
pub struct TypeMismatchError {
    /// Fully qualified name of the type that was expected.
    pub expected: &'static str,
}

/// Comparison against an arbitrary value that fails on a type mismatch.
///
/// Implementors get both methods for free; the ordering is the type's own
/// [`Ord`] implementation.
pub trait TryCompare: Ord + Any + Sized {
    /// Order `self` against `other`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatchError`] when `other` is not a `Self`.
    fn try_cmp(&self, other: &dyn Any) -> Result<Ordering, TypeMismatchError> {
        other
            .downcast_ref::<Self>()
            .map(|other| self.cmp(other))
            .ok_or_else(|| TypeMismatchError {
                expected: type_name::<Self>(),
            })
    }

    /// Test `self` and `other` for equality.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatchError`] when `other` is not a `Self`.
    fn try_eq(&self, other: &dyn Any) -> Result<bool, TypeMismatchError> {
        self.try_cmp(other).map(Ordering::is_eq)
    }
}
