//! Test-oriented comparison of structured errors.
//!
//! Example
//! ```rust,ignore
//! use errs::{e, match_errors, Kind, UserName};
//!
//! let err = lookup("john");
//! // Is err a NotExist error for user john, whatever its code?
//! assert!(match_errors(&*e![Kind::NotExist, UserName::new("john")], &*err));
//! ```
use std::error::Error as StdError;

use crate::{Error, Kind};

/// Safe downcast to a structured error.
pub fn as_structured<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    err.downcast_ref::<Error>()
}

/// Compare `expected` against `actual`.
///
/// Both must be structured errors, otherwise the result is `false`. Every field
/// set on `expected` must equal the same field on `actual`; empty fields (and
/// `Kind::Other`) on `expected` match anything, and fields only set on `actual`
/// are ignored. Realm is not compared.
///
/// If the cause of `expected` is structured the comparison recurs into both
/// causes; otherwise the causes' messages must be equal.
pub fn match_errors(expected: &(dyn StdError + 'static), actual: &(dyn StdError + 'static)) -> bool {
    match (as_structured(expected), as_structured(actual)) {
        (Some(expected), Some(actual)) => expected.matches(actual),
        _ => false,
    }
}

/// Whether `err` is a structured error of the given kind.
pub fn kind_is(kind: Kind, err: &(dyn StdError + 'static)) -> bool {
    as_structured(err).is_some_and(|err| err.kind == kind)
}

impl Error {
    /// Typed form of [`match_errors`], with `self` as the expected pattern.
    pub fn matches(&self, actual: &Error) -> bool {
        if !self.user.is_empty() && actual.user != self.user {
            return false;
        }
        if !self.kind.is_other() && actual.kind != self.kind {
            return false;
        }
        if !self.param.is_empty() && actual.param != self.param {
            return false;
        }
        if !self.code.is_empty() && actual.code != self.code {
            return false;
        }
        match self.nested() {
            Some(expected_cause) => match_errors(expected_cause, actual.cause()),
            None => actual.cause().to_string() == self.cause().to_string(),
        }
    }
}
