//! Strongly-typed string fields carried by [`crate::Error`].
//!
//! Each field is its own type so the builder can tell them apart by type alone:
//! `Code::new("x")` and `Parameter::new("x")` land in different slots.
use std::fmt;

macro_rules! string_field {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
            /// Take the value out, leaving this field empty.
            pub fn take(&mut self) -> Self {
                std::mem::take(self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_field!(
    /// Identity of the user attempting the operation.
    UserName
);
string_field!(
    /// Short, machine-stable label distinguishing errors within a [`crate::Kind`].
    Code
);
string_field!(
    /// Name of the parameter the error relates to.
    Parameter
);
string_field!(
    /// Description of a protected area, as used in a `WWW-Authenticate` challenge.
    ///
    /// Defaults to [`crate::DEFAULT_REALM`] for `Kind::Unauthenticated` errors built
    /// without one.
    Realm
);
