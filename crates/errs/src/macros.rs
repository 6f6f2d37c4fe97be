/// Build an error from a list of arguments of mixed types.
///
/// Each argument is dispatched on its static type:
/// - anything convertible into [`Arg`](crate::Arg): kinds, typed fields, text,
///   structured errors, boxed errors, validation aggregates;
/// - any other error implementing [`StackTrace`](crate::StackTrace): used as
///   the cause as it is, keeping its own stack;
/// - any other `std::error::Error + Send + Sync + 'static`: used as the cause;
/// - any other `Debug` value: rejected, the result is a
///   [`BadCall`](crate::BadCall) naming the call site, the type and the value.
///
/// ```rust,ignore
/// use errs::{e, Code, Kind};
///
/// let err = e![Kind::NotExist, Code::new("user_missing"), "no such user"];
/// assert_eq!(err.to_string(), "no such user");
/// ```
///
/// `e![]` panics.
#[macro_export]
macro_rules! e {
    () => {
        $crate::e(::std::iter::empty::<$crate::Arg>())
    };
    ($($arg:expr),+ $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::__private::{ViaArg as _, ViaDebug as _, ViaError as _, ViaTraced as _};
        $crate::e(
            [$((&&&&$crate::__private::Slot::new($arg)).into_arg()),+]
                .into_iter()
                .flatten(),
        )
    }};
}

// Method resolution picks the first impl whose receiver matches while peeling
// references off `&&&&Slot<T>`: `Into<Arg>` first, then an error with its own
// stack, then any error, then debug.
#[doc(hidden)]
pub mod __private {
    use std::cell::Cell;
    use std::error::Error as StdError;
    use std::fmt::Debug;

    use crate::{Arg, stack::TracedError};

    pub struct Slot<T>(Cell<Option<T>>);

    impl<T> Slot<T> {
        pub fn new(value: T) -> Self {
            Slot(Cell::new(Some(value)))
        }

        fn take(&self) -> Option<T> {
            self.0.take()
        }
    }

    pub trait ViaArg {
        fn into_arg(&self) -> Option<Arg>;
    }

    impl<T: Into<Arg>> ViaArg for &&&Slot<T> {
        fn into_arg(&self) -> Option<Arg> {
            self.take().map(Into::into)
        }
    }

    pub trait ViaTraced {
        fn into_arg(&self) -> Option<Arg>;
    }

    impl<T: TracedError> ViaTraced for &&Slot<T> {
        fn into_arg(&self) -> Option<Arg> {
            self.take().map(Arg::traced)
        }
    }

    pub trait ViaError {
        fn into_arg(&self) -> Option<Arg>;
    }

    impl<T: StdError + Send + Sync + 'static> ViaError for &Slot<T> {
        fn into_arg(&self) -> Option<Arg> {
            self.take().map(Arg::cause)
        }
    }

    pub trait ViaDebug {
        fn into_arg(&self) -> Option<Arg>;
    }

    impl<T: Debug> ViaDebug for Slot<T> {
        fn into_arg(&self) -> Option<Arg> {
            self.take().map(|value| Arg::unsupported(&value))
        }
    }
}
