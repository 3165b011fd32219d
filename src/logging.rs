//! Unified Logging Macros for wolf-ism8
//!
//! This module provides a unified logging interface that automatically
//! selects between `defmt::` (embedded), `log::` (std hosts) or a no-op
//! sink based on the active feature flags.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::ism8_log;
//!
//! ism8_log!(info, "Connection from ISM8");
//! ism8_log!(debug, "Received {} bytes", n);
//! ism8_log!(warn, "Message faulty, no ACK");
//! ism8_log!(error, "Data validation failed");
//! ```
//!
//! # Feature Flags
//!
//! - `defmt` - Uses `defmt::` (efficient for embedded targets)
//! - `log` - Uses the `log::` crate (std hosts)
//! - Neither - Arguments are formatted into a no-op sink

/// Discards formatted log arguments when no logging backend is enabled.
#[inline]
pub fn sink(_args: core::fmt::Arguments<'_>) {}

/// Unified logging macro - selects defmt:: or log:: based on features
///
/// This macro provides a consistent logging API across the entire crate,
/// regardless of which logging backend is configured at compile time.
#[macro_export]
#[cfg(feature = "defmt")]
macro_rules! ism8_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(not(feature = "defmt"), feature = "log"))]
macro_rules! ism8_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(not(feature = "defmt"), not(feature = "log")))]
macro_rules! ism8_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::logging::sink(core::format_args!($($arg)*))
    };
}
