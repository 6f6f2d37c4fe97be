//// Closed classification of structured errors.
//!
//! `Kind::Other` is the zero value and means "unclassified". Callers map kinds
//! onto their own transport (HTTP status, exit codes) as they see fit:
//! - Unauthenticated: the caller is not known, usually paired with a [`crate::Realm`]
//! - Unauthorized: the caller is known but not permitted
use std::fmt;
use std::str::FromStr;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Unclassified error.
    #[default]
    Other,
    /// External I/O error such as network failure.
    IO,
    /// Information withheld.
    Private,
    /// Internal error or inconsistency.
    Internal,
    Database,
    /// Resource already exists.
    Exist,
    /// Resource does not exist.
    NotExist,
    /// Invalid operation for this type of item.
    Invalid,
    /// Input validation error.
    Validation,
    InvalidRequest,
    Unauthenticated,
    Unauthorized,
}

impl Kind {
    pub const ALL: [Kind; 12] = [
        Kind::Other,
        Kind::IO,
        Kind::Private,
        Kind::Internal,
        Kind::Database,
        Kind::Exist,
        Kind::NotExist,
        Kind::Invalid,
        Kind::Validation,
        Kind::InvalidRequest,
        Kind::Unauthenticated,
        Kind::Unauthorized,
    ];

    /// Stable diagnostic label for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Other => "other_error",
            Kind::IO => "I/O_error",
            Kind::Private => "private",
            Kind::Internal => "internal_error",
            Kind::Database => "database_error",
            Kind::Exist => "resource_already_exists",
            Kind::NotExist => "resource_does_not_exist",
            Kind::Invalid => "invalid_operation",
            Kind::Validation => "input_validation_error",
            Kind::InvalidRequest => "invalid_request_error",
            Kind::Unauthenticated => "unauthenticated_request",
            Kind::Unauthorized => "unauthorized_request",
        }
    }

    pub fn is_other(self) -> bool {
        self == Kind::Other
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error kind label: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
