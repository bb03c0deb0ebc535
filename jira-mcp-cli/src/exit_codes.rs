//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: Warnings, or a tool call that returned a failure envelope
//! - 2: Invalid input, configuration errors or failed checks

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Warnings found, or the tool reported a failure
pub const EXIT_WARNING: i32 = 1;

/// Invalid input or critical failures
pub const EXIT_ERROR: i32 = 2;
