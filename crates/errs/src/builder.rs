//! Construction of structured errors.
//!
//! [`e`] (and the [`crate::e!`] macro over it) takes a heterogeneous argument list
//! and dispatches each argument on its type. [`Builder`] is the typed route to
//! the same result, one setter per field.
//!
//! Both apply the same post-processing once all arguments are in:
//! 1. an `Unauthenticated` error without a realm gets [`DEFAULT_REALM`];
//! 2. an error without a cause gets the [`crate::UndefinedError`] sentinel;
//! 3. if the cause is itself a structured error, fields are promoted from it
//!    (see [`promote`]).
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::{
    BoxError, Code, DEFAULT_REALM, Error, Kind, Message, Parameter, Realm, UserName,
    ValidationErrors,
    error::Cause,
    stack::{Traced, TracedError},
};

/// One typed argument to [`e`]. If the same variant appears twice, the last wins.
#[derive(Debug)]
pub enum Arg {
    Kind(Kind),
    User(UserName),
    Code(Code),
    Param(Parameter),
    Realm(Realm),
    /// Text for a new base error, used as the cause.
    Message(String),
    /// A structured error, used as the cause and subject to field promotion.
    Error(Error),
    /// An error carrying its own stack, used as the cause as it is.
    Traced(Box<dyn TracedError>),
    /// Any other error, used as the cause after the stack capture policy.
    Cause(BoxError),
    /// A value the builder has no slot for. Makes [`e`] return a [`BadCall`].
    Unsupported {
        type_name: &'static str,
        value: String,
    },
}

impl Arg {
    pub fn cause(err: impl StdError + Send + Sync + 'static) -> Self {
        Arg::Cause(Box::new(err))
    }

    pub fn traced(err: impl TracedError) -> Self {
        Arg::Traced(Box::new(err))
    }

    pub fn unsupported<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Arg::Unsupported {
            type_name: std::any::type_name::<T>(),
            value: format!("{value:?}"),
        }
    }
}

impl From<Kind> for Arg {
    fn from(kind: Kind) -> Self {
        Arg::Kind(kind)
    }
}

impl From<UserName> for Arg {
    fn from(user: UserName) -> Self {
        Arg::User(user)
    }
}

impl From<Code> for Arg {
    fn from(code: Code) -> Self {
        Arg::Code(code)
    }
}

impl From<Parameter> for Arg {
    fn from(param: Parameter) -> Self {
        Arg::Param(param)
    }
}

impl From<Realm> for Arg {
    fn from(realm: Realm) -> Self {
        Arg::Realm(realm)
    }
}

impl From<&str> for Arg {
    fn from(msg: &str) -> Self {
        Arg::Message(msg.to_string())
    }
}

impl From<String> for Arg {
    fn from(msg: String) -> Self {
        Arg::Message(msg)
    }
}

impl From<Error> for Arg {
    fn from(err: Error) -> Self {
        Arg::Error(err)
    }
}

impl From<BoxError> for Arg {
    fn from(err: BoxError) -> Self {
        Arg::Cause(err)
    }
}

impl From<ValidationErrors> for Arg {
    fn from(errs: ValidationErrors) -> Self {
        Arg::Cause(Box::new(errs))
    }
}

/// Misuse of [`e`]: an argument of a type the builder has no slot for.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "errs::e: bad call from {file}:{line}: {args}, unknown type {type_name}, value {value} in error call"
)]
pub struct BadCall {
    pub file: &'static str,
    pub line: u32,
    pub args: String,
    pub type_name: &'static str,
    pub value: String,
}

/// Build an error from a list of typed arguments.
///
/// Returns a structured [`Error`] boxed as a [`BoxError`], or a [`BadCall`] if any
/// argument is [`Arg::Unsupported`].
///
/// # Panics
///
/// Panics when `args` is empty. That is always a coding mistake.
#[track_caller]
pub fn e<I: IntoIterator<Item = Arg>>(args: I) -> BoxError {
    let args: Vec<Arg> = args.into_iter().collect();
    if args.is_empty() {
        panic!("call to errs::e with no arguments");
    }

    let unsupported = args.iter().find_map(|arg| match arg {
        Arg::Unsupported { type_name, value } => Some((*type_name, value.clone())),
        _ => None,
    });
    if let Some((type_name, value)) = unsupported {
        let location = Location::caller();
        tracing::warn!(
            location = %location,
            type_name,
            "unsupported argument passed to error builder"
        );
        return Box::new(BadCall {
            file: location.file(),
            line: location.line(),
            args: format!("{args:?}"),
            type_name,
            value,
        });
    }

    let builder = args.into_iter().fold(Builder::new(), Builder::arg);
    Box::new(builder.build())
}

/// Typed construction of an [`Error`].
#[derive(Debug, Default)]
pub struct Builder {
    user: UserName,
    kind: Kind,
    code: Code,
    param: Parameter,
    realm: Realm,
    cause: Option<Cause>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn user(mut self, user: impl Into<UserName>) -> Self {
        self.user = user.into();
        self
    }

    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = code.into();
        self
    }

    pub fn param(mut self, param: impl Into<Parameter>) -> Self {
        self.param = param.into();
        self
    }

    pub fn realm(mut self, realm: impl Into<Realm>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Use a new base error with this text as the cause.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let traced: Arc<Traced> = Arc::new(Traced::capture(Message::new(msg)));
        self.cause = Some(Cause::Traced(traced));
        self
    }

    /// Use a structured error as the cause.
    pub fn error(mut self, err: Error) -> Self {
        self.cause = Some(Cause::Structured(Box::new(err)));
        self
    }

    /// Use any error as the cause.
    ///
    /// A boxed structured [`Error`] is unboxed and treated like [`Builder::error`].
    /// [`ValidationErrors`] and errors that already carry a stack are stored as
    /// they are; anything else is wrapped to capture the current stack.
    pub fn cause(mut self, err: impl Into<BoxError>) -> Self {
        self.cause = Some(classify(err.into()));
        self
    }

    /// Use an error that carries its own stack as the cause, without capturing
    /// another one. A structured [`Error`] is treated like [`Builder::error`].
    pub fn traced_cause(mut self, err: impl TracedError) -> Self {
        self.cause = Some(classify_traced(Box::new(err)));
        self
    }

    // Unsupported arguments are rejected by `e` before any is applied.
    pub(crate) fn arg(self, arg: Arg) -> Self {
        match arg {
            Arg::Kind(kind) => self.kind(kind),
            Arg::User(user) => self.user(user),
            Arg::Code(code) => self.code(code),
            Arg::Param(param) => self.param(param),
            Arg::Realm(realm) => self.realm(realm),
            Arg::Message(msg) => self.message(msg),
            Arg::Error(err) => self.error(err),
            Arg::Traced(err) => Self {
                cause: Some(classify_traced(err)),
                ..self
            },
            Arg::Cause(err) => self.cause(err),
            Arg::Unsupported { .. } => self,
        }
    }

    pub fn build(self) -> Error {
        let Builder {
            user,
            kind,
            code,
            param,
            realm,
            cause,
        } = self;

        let mut header = Header {
            kind,
            code,
            param,
            realm,
        };
        if header.realm.is_empty() && header.kind == Kind::Unauthenticated {
            header.realm = Realm::new(DEFAULT_REALM);
        }

        let cause = match cause.unwrap_or(Cause::Undefined) {
            Cause::Structured(prev) => {
                let (outer, inner) = promote(header, *prev);
                header = outer;
                Cause::Structured(Box::new(inner))
            }
            other => other,
        };

        Error {
            user,
            kind: header.kind,
            code: header.code,
            param: header.param,
            realm: header.realm,
            cause,
        }
    }
}

fn classify(err: BoxError) -> Cause {
    let err = match err.downcast::<Error>() {
        Ok(structured) => return Cause::Structured(structured),
        Err(err) => err,
    };
    let err = match err.downcast::<Traced>() {
        Ok(traced) => {
            let traced: Arc<Traced> = Arc::from(traced);
            return Cause::Traced(traced);
        }
        Err(err) => err,
    };
    if err.is::<ValidationErrors>() {
        return Cause::Other(Arc::from(err));
    }
    tracing::trace!(cause = %err, "capturing stack for error cause");
    let traced: Arc<Traced> = Arc::new(Traced::capture(err));
    Cause::Traced(traced)
}

fn classify_traced(err: Box<dyn TracedError>) -> Cause {
    if err.as_error().is::<Error>() {
        return classify(err.into_boxed());
    }
    Cause::Traced(Arc::from(err))
}

/// The fields that move between an error and the structured error it wraps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub kind: Kind,
    pub code: Code,
    pub param: Parameter,
    pub realm: Realm,
}

/// Bubble fields up from a wrapped structured error.
///
/// The outer error surfaces the most specific information available, and a
/// value never shows at two levels of the chain:
/// - kind: an unset (`Other`) outer kind takes the inner one, which is reset;
/// - code, param, realm: an inner value equal to the outer one is cleared, then
///   an empty outer value takes the inner one, which is cleared.
///
/// Only one level is processed. The realm default for `Unauthenticated` is not
/// applied again afterwards.
pub fn promote(mut outer: Header, mut inner: Error) -> (Header, Error) {
    if outer.kind.is_other() {
        outer.kind = std::mem::take(&mut inner.kind);
    }
    bubble(&mut outer.code, &mut inner.code);
    bubble(&mut outer.param, &mut inner.param);
    bubble(&mut outer.realm, &mut inner.realm);

    tracing::trace!(
        kind = %outer.kind,
        code = %outer.code,
        param = %outer.param,
        "promoted fields from nested error"
    );
    (outer, inner)
}

fn bubble<T: PartialEq + Default>(outer: &mut T, inner: &mut T) {
    if *inner == *outer {
        *inner = T::default();
    }
    if *outer == T::default() {
        *outer = std::mem::take(inner);
    }
}
