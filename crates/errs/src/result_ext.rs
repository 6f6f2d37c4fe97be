use std::error::Error as StdError;
use std::iter;

use super::{Arg, BoxError, Error, Kind};

/// Extension trait for `Result` wrapping its error into a structured one at the
/// point it crosses a layer boundary.
///
/// Example
/// ```rust,ignore
/// use errs::{Code, Kind, ResultExt};
///
/// fn load(path: &str) -> Result<String, errs::Error> {
///     std::fs::read_to_string(path).kind(Kind::IO)
/// }
/// ```
pub trait ResultExt<T> {
    /// Wrap the error as the cause of a structured error of the given kind.
    fn kind(self, kind: Kind) -> Result<T, Error>;

    /// Wrap the error as the cause of an error built from lazily produced
    /// arguments, as [`crate::e`] would. The wrapped error is the cause even if
    /// the arguments carry one.
    fn with_args<I, F>(self, args: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = Arg>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn kind(self, kind: Kind) -> Result<T, Error> {
        self.map_err(|err| Error::builder().kind(kind).cause(err).build())
    }

    #[track_caller]
    fn with_args<I, F>(self, args: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = Arg>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(crate::e(
                args().into_iter().chain(iter::once(Arg::cause(err))),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Code, match_errors};

    fn refused() -> Result<(), std::io::Error> {
        Err(std::io::Error::other("connection refused"))
    }

    #[test]
    fn kind_wraps_error() {
        let err = refused().kind(Kind::IO).unwrap_err();
        assert_eq!(err.kind, Kind::IO);
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.is::<std::io::Error>());
    }

    #[test]
    fn ok_passes_through() {
        let value: Result<u8, std::io::Error> = Ok(9);
        assert_eq!(value.kind(Kind::IO).unwrap(), 9);
    }

    #[test]
    fn with_args_builds_structured_error() {
        let err = refused()
            .with_args(|| [Arg::Kind(Kind::IO), Code::new("net").into()])
            .unwrap_err();
        let expected = Error::builder()
            .kind(Kind::IO)
            .code("net")
            .message("connection refused")
            .build();
        assert!(match_errors(&expected, &*err));
    }

    #[test]
    fn structured_errors_are_nested() {
        let inner: Result<(), Error> = Err(Error::builder().code("db").build());
        let err = inner.kind(Kind::Database).unwrap_err();
        assert_eq!(err.code, "db");
        assert!(err.nested().is_some());
    }
}
