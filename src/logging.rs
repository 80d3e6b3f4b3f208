//! Structured logging setup: the `log` facade at the seams the engine
//! actually cares about — search
//! iteration boundaries, TT allocation, illegal moves recovered during
//! `position ... moves ...`, and Lazy-SMP worker lifecycle. Gated behind
//! the `logging` Cargo feature so a library embedder can opt out entirely.

#[cfg(feature = "logging")]
pub fn init() {
    use std::io::Write;

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        })
        .try_init();
}

#[cfg(not(feature = "logging"))]
pub fn init() {}

/// UCI commands must never be echoed through stdout outside the protocol
/// itself, so logging is directed at stderr by `env_logger`'s default
/// target; this macro set just re-exports the facade for call sites that
/// want to log without feature-gating every call.
#[cfg(feature = "logging")]
pub(crate) use log::{debug, info, trace, warn};

#[cfg(not(feature = "logging"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! info {
        ($($arg:tt)*) => {};
    }
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
    pub(crate) use {debug, info, trace, warn};
}

#[cfg(not(feature = "logging"))]
pub(crate) use noop::{debug, info, trace, warn};
