//! Process-wide stack capture settings.
//!
//! With the `backtrace-default` feature (on by default) every stack-wrapped cause
//! records its call stack. Without it, capture follows the std conventions:
//! `RUST_LIB_BACKTRACE` wins over `RUST_BACKTRACE`, and `0` disables.
//!
//! The decision is made once and cached for the life of the process.
use std::sync::OnceLock;

static STACK_CAPTURE: OnceLock<bool> = OnceLock::new();

/// Whether stack-wrapped causes capture call stacks in this process.
pub fn stack_capture_enabled() -> bool {
    *STACK_CAPTURE.get_or_init(|| {
        let enabled = cfg!(feature = "backtrace-default") || capture_from_env(env_var);
        tracing::trace!(enabled, "stack capture configured");
        enabled
    })
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn capture_from_env(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("RUST_LIB_BACKTRACE")
        .or_else(|| lookup("RUST_BACKTRACE"))
        .is_some_and(|v| v != "0")
}
