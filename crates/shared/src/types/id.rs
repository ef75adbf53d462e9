//! Typed IDs for type-safe record references.
//!
//! Using typed IDs prevents accidentally passing a `DriverId` where a `CompanyId` is expected.
//! Record identifiers are opaque strings assigned by whoever created the record
//! (entry form, bulk import), so the wrappers hold a `String` rather than a UUID.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates an ID from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(TransferId, "Unique identifier for a transfer record.");
typed_id!(DriverId, "Unique identifier for a driver.");
typed_id!(CompanyId, "Unique identifier for a contracting company.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_typed_id_new_and_display() {
        let id = DriverId::new("driv1");
        assert_eq!(id.as_str(), "driv1");
        assert_eq!(id.to_string(), "driv1");
    }

    #[test]
    fn test_typed_id_from_str() {
        let id = CompanyId::from("comp1");
        assert_eq!(id, CompanyId::new(String::from("comp1")));
    }

    #[test]
    fn test_typed_id_serde_transparent() {
        let id: TransferId = serde_json::from_str("\"trans1\"").unwrap();
        assert_eq!(id, TransferId::new("trans1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"trans1\"");
    }

    #[test]
    fn test_typed_id_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(DriverId::new("driv2"), 7);
        assert_eq!(map.get("driv2"), Some(&7));
        assert_eq!(map.get("driv3"), None);
    }
}
