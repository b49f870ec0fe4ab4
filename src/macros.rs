//! Logging macros for ergonomic log message formatting.
//!
//! The message takes `format!` arguments; structured fields follow a `;`.
//! Formatting is skipped entirely when the level is filtered out.
//!
//! # Examples
//!
//! ```
//! use colorful_logger::prelude::*;
//! use colorful_logger::{error, info};
//!
//! let logger = Logger::builder().min_level(Severity::Info).build()?;
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Listening on port {}", port);
//!
//! error!(logger, "Request failed"; status = 500, path = "/users");
//! # logger.shutdown();
//! # Ok::<(), LoggerError>(())
//! ```

/// Build [`Fields`](crate::Fields) from `key = value` pairs, in order.
///
/// ```
/// use colorful_logger::fields;
///
/// let fields = fields!(user_id = 42, name = "Tommy");
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with_field(stringify!($key), $value))+
    };
}

/// Log a message at the given level.
///
/// ```
/// # use colorful_logger::prelude::*;
/// # let logger = Logger::builder().build()?;
/// use colorful_logger::log;
/// log!(logger, Severity::Warning, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500; retry = true);
/// # logger.shutdown();
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(; $($key:ident = $value:expr),+ $(,)?)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(
                level,
                format!($fmt $(, $arg)*),
                $crate::fields!($($($key = $value),+)?),
            );
        }
    }};
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log at FATAL, flush every sink, then exit with status 1.
///
/// ```no_run
/// # use colorful_logger::prelude::*;
/// # let logger = Logger::builder().build()?;
/// use colorful_logger::fatal;
/// fatal!(logger, "Unable to recover: {}", "disk full"; device = "/dev/sda1");
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(; $($key:ident = $value:expr),+ $(,)?)?) => {
        $logger.fatal(
            format!($fmt $(, $arg)*),
            $crate::fields!($($($key = $value),+)?),
        )
    };
}
