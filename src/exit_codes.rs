/// Exit codes for pdoc-prep
///
/// These let scripts tell a broken generator run apart from bad input.
/// Success - Documentation was generated and patched
pub const SUCCESS: i32 = 0;

/// Generator failure - The documentation generator exited unsuccessfully
pub const GENERATOR_FAILED: i32 = 1;

/// Tool error - Invalid arguments, annotation errors, configuration or file access errors
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }

    /// Exit with the code of a failed run, e.g. [`crate::PrepError::exit_code`]
    pub fn with_code(code: i32) -> ! {
        std::process::exit(code);
    }
}
