//! Utility modules.

/// Date/time deserialization helpers shared by record types.
pub mod datetime;

/// Log sanitization utilities to keep credentials and large bodies out of logs.
pub mod log_sanitizer;

/// Lenient numeric fields and currency formatting.
pub mod number;
