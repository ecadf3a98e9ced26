//! Identity newtypes.
//!
//! Numeric ids keep the prototype's integer identities while stopping a
//! tour id from being passed where an operation id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

numeric_id!(
    /// Identity of a tour (resource timeline).
    TourId
);

numeric_id!(
    /// Identity of an operation placed on a tour. Immutable once assigned.
    OperationId
);

numeric_id!(
    /// Identity of a template waiting in the unassigned pool.
    TemplateId
);
