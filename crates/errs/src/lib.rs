//! errs: structured error values.
//!
//! An [`Error`] carries a [`Kind`], a machine-stable [`Code`], the offending
//! [`Parameter`], an authentication [`Realm`], the acting [`UserName`] and the
//! cause that triggered it. Errors are built with the variadic [`e!`] macro (or
//! [`e`] over a list of [`Arg`]s, or [`Builder`]), where the type of each argument
//! decides which field it fills.
//!
//! Wrapping a structured error inside another bubbles its fields up, so the
//! outermost error carries the most specific information and no value shows at
//! two levels of the chain. Formatting with `{}` prints only the innermost
//! message; `{:#}` adds the captured call stack, one frame per line.
//!
//! Quick start
//! ```rust,ignore
//! use errs::{e, kind_is, match_errors, Code, Kind, UserName};
//!
//! fn find_user(name: &str) -> Result<(), errs::BoxError> {
//!     Err(e![Kind::NotExist, UserName::new(name), Code::new("user_missing"), "no such user"])
//! }
//!
//! let err = find_user("alice").unwrap_err();
//! assert!(kind_is(Kind::NotExist, &*err));
//! assert!(match_errors(&*e![Kind::NotExist, UserName::new("alice"), "no such user"], &*err));
//! assert_eq!(err.to_string(), "no such user");
//! ```
//!
//! Transport mapping (HTTP status, wire formats) is left to callers.
#[macro_use]
mod macros;

pub mod builder;
pub mod config;
pub mod error;
pub mod fields;
pub mod kind;
pub mod matcher;
pub mod result_ext;
pub mod stack;
pub mod validation;

// public exports
pub use builder::{Arg, BadCall, Builder, Header, e, promote};
pub use error::{DEFAULT_REALM, Error, Message, UNDEFINED_MESSAGE, UndefinedError};
pub use fields::{Code, Parameter, Realm, UserName};
pub use kind::{Kind, ParseKindError};
pub use matcher::{as_structured, kind_is, match_errors};
pub use result_ext::ResultExt;
pub use stack::{StackTrace, Traced, TracedError};
pub use validation::{FieldViolation, ValidationErrors};

#[doc(hidden)]
pub use macros::__private;

/// Type-erased error, as returned by [`e`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
