//! Exit code constants for the ttnconf CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown option, missing value)
//! - 2: I/O failure (config file could not be read or written)
//! - 3: Parse failure (config file is not valid UTF-8)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown option, or a value that is not set.
pub const USER_ERROR: i32 = 1;

/// I/O failure: the config file or its directory is unreadable or unwritable.
pub const IO_FAILURE: i32 = 2;

/// Parse failure: the config file content could not be decoded.
pub const PARSE_FAILURE: i32 = 3;
