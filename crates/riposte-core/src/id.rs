//! Target object identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a bound target object.
///
/// The id is allowed to outlive the object it names. Holders re-validate it
/// through a [`TargetRegistry`](crate::TargetRegistry) lookup before every
/// use instead of keeping a live reference, so a stale id degrades to a
/// skipped call rather than a dangling access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Create an id from its raw bit representation.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bit representation of the id.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
