//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "` from a string.")]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Relay-assigned opportunity identifier, unique per opportunity.
    OpportunityId
);

string_id!(
    /// Relay-assigned bid identifier.
    ///
    /// Returned when a bid submission is acknowledged and used to correlate
    /// later status updates.
    BidId
);

string_id!(
    /// Chain identifier as the relay names it (e.g. `sepolia`).
    ChainId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = BidId::new("b-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"b-1\"");

        let parsed: OpportunityId = serde_json::from_str("\"op-1\"").unwrap();
        assert_eq!(parsed.as_str(), "op-1");
    }

    #[test]
    fn display_is_inner_value() {
        assert_eq!(ChainId::from("sepolia").to_string(), "sepolia");
    }
}
