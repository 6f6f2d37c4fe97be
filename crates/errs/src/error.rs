use backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::{
    Builder, Code, Kind, Parameter, Realm, UserName,
    stack::{self, StackTrace, Traced, TracedError},
};

/// Realm given to `Kind::Unauthenticated` errors built without one.
pub const DEFAULT_REALM: &str = "restricted";

/// Message of the cause recorded when an error is built without one.
pub const UNDEFINED_MESSAGE: &str = "undefined error";

/// Sentinel cause of errors built without an explicit cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", UNDEFINED_MESSAGE)]
pub struct UndefinedError;

static UNDEFINED: UndefinedError = UndefinedError;

/// Base error built from plain text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Message(String);

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Cause {
    Undefined,
    Structured(Box<Error>),
    /// Carries its own stack, printed by `{:#}`.
    Traced(Arc<dyn TracedError>),
    Other(Arc<dyn StdError + Send + Sync>),
}

/// A structured error: classification fields plus the cause that triggered it.
///
/// Build one with [`crate::e`], the [`crate::e!`] macro or [`Error::builder`].
/// Empty fields are unset. The cause is always present; errors built without one
/// carry [`UndefinedError`].
///
/// `{}` renders only the cause's message. `{:#}` appends the captured stack,
/// one frame per line, when the cause carries one.
#[derive(Debug, Clone)]
pub struct Error {
    /// The user attempting the operation.
    pub user: UserName,
    /// Class of error, `Kind::Other` if unknown or irrelevant.
    pub kind: Kind,
    pub code: Code,
    pub param: Parameter,
    pub realm: Realm,
    pub(crate) cause: Cause,
}

impl Error {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The error that triggered this one.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        match &self.cause {
            Cause::Undefined => &UNDEFINED,
            Cause::Structured(err) => &**err,
            Cause::Traced(err) => err.as_error(),
            Cause::Other(err) => &**err,
        }
    }

    /// The cause, if it is itself a structured error.
    pub fn nested(&self) -> Option<&Error> {
        match &self.cause {
            Cause::Structured(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Whether an `E` appears anywhere along the cause chain.
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.find::<E>().is_some()
    }

    /// The first `E` along the cause chain.
    ///
    /// The walk descends through nested structured errors and stack wrappers,
    /// then follows `source()`.
    pub fn find<E: StdError + 'static>(&self) -> Option<&E> {
        let first: &(dyn StdError + 'static) = self.cause();
        let mut next = Some(first);
        while let Some(err) = next {
            if let Some(found) = err.downcast_ref::<E>() {
                return Some(found);
            }
            next = peel(err);
        }
        None
    }

    pub fn is_undefined_cause(&self) -> bool {
        self.is::<UndefinedError>()
    }

    /// An error is zero when it carries nothing a caller could act on: no cause
    /// and no user, parameter or code. Kind and realm are not consulted.
    pub fn is_zero(&self) -> bool {
        self.is_undefined_cause()
            && self.user.is_empty()
            && self.param.is_empty()
            && self.code.is_empty()
    }
}

// One layer down, seeing through the wrappers this crate adds.
fn peel<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    let below: &'a (dyn StdError + 'static) = if let Some(structured) = err.downcast_ref::<Error>() {
        structured.cause()
    } else if let Some(traced) = err.downcast_ref::<Traced>() {
        traced.inner()
    } else {
        return err.source();
    };
    Some(below)
}

impl StackTrace for Error {
    fn stack_trace(&self) -> Option<&Backtrace> {
        match &self.cause {
            Cause::Undefined | Cause::Other(_) => None,
            Cause::Structured(err) => err.stack_trace(),
            Cause::Traced(err) => err.stack_trace(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return fmt::Display::fmt(self.cause(), f);
        }
        write!(f, "{}", self.cause())?;
        if let Some(trace) = self.stack_trace() {
            for line in stack::frame_lines(trace) {
                write!(f, "\n{line}")?;
            }
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause().source()
    }
}
