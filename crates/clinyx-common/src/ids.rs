//! Typed identifiers for catalog entities.
//!
//! Every catalog category gets its own id space. A `SymptomId(3)` and a
//! `SignId(3)` are different types and can never be compared, hashed into
//! the same set, or passed where the other is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdParseError;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Human-readable category name, used in error messages.
            pub const KIND: &'static str = $kind;

            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(IdParseError::Empty { kind: $kind });
                }
                let raw: u32 = s.parse().map_err(|_| IdParseError::Invalid {
                    kind: $kind,
                    value: s.to_string(),
                })?;
                if raw == 0 {
                    return Err(IdParseError::Zero { kind: $kind });
                }
                Ok(Self(raw))
            }
        }
    };
}

catalog_id!(
    /// Identity of a patient-reported symptom.
    SymptomId, "symptom"
);
catalog_id!(
    /// Identity of a clinician-observed sign.
    SignId, "sign"
);
catalog_id!(
    /// Identity of a catalogued disease.
    DiseaseId, "disease"
);
catalog_id!(LabTestId, "lab test");
catalog_id!(PostMortemTestId, "post-mortem test");
