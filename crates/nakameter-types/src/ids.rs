//! Identifier newtypes for projects, criteria, and data providers.

use std::borrow::Cow;
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Create from a static string (the common case: built-in tables).
            pub const fn from_static(s: &'static str) -> Self {
                Self(Cow::Borrowed(s))
            }

            /// Create from an owned string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(Cow::Owned(s.into()))
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $name {
            fn from(s: &'static str) -> Self {
                Self(Cow::Borrowed(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Cow::Owned(s))
            }
        }
    };
}

id_type! {
    /// A tracked blockchain or DeFi protocol (e.g. `"cosmos"`, `"arbitrum"`).
    ProjectId
}

id_type! {
    /// A scoring input (e.g. `"nakamoto-coefficient"`, `"admin-halt-capability"`).
    CriterionId
}

id_type! {
    /// An upstream data provider (e.g. `"mintscan"`, `"blockchair"`).
    ProviderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_owned_compare_equal() {
        let a = CriterionId::from_static("nakamoto-coefficient");
        let b = CriterionId::new(String::from("nakamoto-coefficient"));
        assert_eq!(a, b);
    }

    #[test]
    fn display_is_raw_identifier() {
        let id = ProviderId::from_static("blockchair");
        assert_eq!(id.to_string(), "blockchair");
        assert_eq!(id.as_str(), "blockchair");
    }
}
