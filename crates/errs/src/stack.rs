use backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use crate::{BoxError, config};

/// Capability marker for errors that carry a captured call stack.
///
/// The builder stores causes implementing this as-is instead of capturing a
/// second stack (the [`crate::e!`] macro routes them there by type, or use
/// [`crate::Builder::traced_cause`]), and verbose formatting (`{:#}`) prints
/// the frames.
pub trait StackTrace {
    /// The captured stack, if capture was enabled when the error was made.
    fn stack_trace(&self) -> Option<&Backtrace>;
}

/// An error that carries its own stack. Implemented for every
/// `Error + StackTrace` type; the builder keeps these behind a trait object.
pub trait TracedError: StdError + StackTrace + Send + Sync + 'static {
    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static);

    fn into_boxed(self: Box<Self>) -> BoxError;
}

impl<T: StdError + StackTrace + Send + Sync + 'static> TracedError for T {
    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_boxed(self: Box<Self>) -> BoxError {
        self
    }
}

/// Transparent wrapper recording the call stack at the point a cause entered
/// the builder.
///
/// `Display` and `source` forward to the wrapped error, so a `Traced` is
/// indistinguishable from its inner error in normal rendering.
pub struct Traced {
    inner: BoxError,
    stack: Option<Backtrace>,
}

impl Traced {
    /// Wrap `inner`, capturing the current stack if capture is enabled.
    pub fn capture(inner: impl Into<BoxError>) -> Self {
        // no closure here: it would add std frames above the caller
        let stack = if config::stack_capture_enabled() {
            Some(Backtrace::new_unresolved())
        } else {
            None
        };
        Self {
            inner: inner.into(),
            stack,
        }
    }

    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl StackTrace for Traced {
    fn stack_trace(&self) -> Option<&Backtrace> {
        self.stack.as_ref()
    }
}

impl fmt::Display for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traced")
            .field("inner", &self.inner)
            .field("frames", &self.stack.as_ref().map(|s| s.frames().len()))
            .finish()
    }
}

impl StdError for Traced {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

/// Render each captured frame as a single `symbol (file:line)` line.
///
/// Leading frames belonging to the capture machinery itself, and the std glue
/// between them, are skipped so the first line is the code that built the
/// error.
pub fn frame_lines(stack: &Backtrace) -> Vec<String> {
    let mut resolved = stack.clone();
    resolved.resolve();

    resolved
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .map(|symbol| {
            let name = symbol
                .name()
                .map(|n| format!("{n:#}"))
                .unwrap_or_else(|| "<unknown>".to_string());
            let line = match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(lineno)) => format!("{name} ({}:{lineno})", file.display()),
                _ => name.clone(),
            };
            (name, line)
        })
        .skip_while(|(name, _)| is_capture_frame(name))
        .map(|(_, line)| line)
        .collect()
}

const CAPTURE_PREFIXES: &[&str] = &[
    "backtrace::",
    "_Unwind_",
    "errs::stack::Traced::capture",
    "errs::builder::e",
    "errs::builder::classify",
    "errs::builder::Builder::",
    "errs::macros::__private::",
    "<errs::",
    "<&errs::",
    "<&&errs::",
    "<&&&errs::",
];

const GLUE_PREFIXES: &[&str] = &[
    "core::", "<core::", "alloc::", "<alloc::", "std::", "<std::", "<T as ",
];

fn is_capture_frame(name: &str) -> bool {
    CAPTURE_PREFIXES
        .iter()
        .chain(GLUE_PREFIXES)
        .any(|prefix| name.starts_with(prefix))
        || name.contains(" as core::ops::function::")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;

    #[test]
    fn display_and_source_are_transparent() {
        let io = std::io::Error::other("disk on fire");
        let traced = Traced::capture(io);
        assert_eq!(traced.to_string(), "disk on fire");
        assert!(traced.source().is_none());
        assert!(traced.inner().downcast_ref::<std::io::Error>().is_some());
    }

    #[inline(never)]
    fn capture_here() -> Traced {
        Traced::capture(Message::new("boom"))
    }

    #[cfg(feature = "backtrace-default")]
    #[test]
    fn captures_frames_when_enabled() {
        let traced = capture_here();
        let stack = traced.stack_trace().expect("stack captured");
        assert!(!stack.frames().is_empty());

        let lines = frame_lines(stack);
        for line in &lines {
            assert!(!line.contains('\n'));
        }
        let first = lines.first().expect("frames rendered");
        assert!(
            first.starts_with("errs::stack::tests::capture_here"),
            "{lines:#?}"
        );
    }

    #[test]
    fn capture_frames_are_recognized() {
        assert!(is_capture_frame("backtrace::capture::Backtrace::new_unresolved"));
        assert!(is_capture_frame("errs::stack::Traced::capture"));
        assert!(is_capture_frame("errs::builder::classify"));
        assert!(is_capture_frame("errs::builder::Builder::cause"));
        assert!(is_capture_frame("core::ops::function::FnOnce::call_once"));
        assert!(is_capture_frame("core::bool::<impl bool>::then"));
        assert!(is_capture_frame("<F as core::ops::function::FnMut<A>>::call_mut"));
        assert!(!is_capture_frame("errs::builder::tests::plain_errors_gain_a_stack_wrapper"));
        assert!(!is_capture_frame("my_app::handler"));
    }

    #[derive(Debug)]
    struct OwnStack(Backtrace);

    impl fmt::Display for OwnStack {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("with its own stack")
        }
    }

    impl StdError for OwnStack {}

    impl StackTrace for OwnStack {
        fn stack_trace(&self) -> Option<&Backtrace> {
            Some(&self.0)
        }
    }

    #[test]
    fn traced_error_exposes_the_error_and_stack() {
        let boxed: Box<dyn TracedError> = Box::new(OwnStack(Backtrace::new_unresolved()));
        assert!(boxed.stack_trace().is_some());
        assert_eq!(boxed.as_error().to_string(), "with its own stack");
        assert!(boxed.into_boxed().downcast_ref::<OwnStack>().is_some());
    }
}
