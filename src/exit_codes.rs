//! Exit code constants for the mordant CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing files, unknown sections)
//! - 2: Validation failure (the file parsed but the configuration is wrong)
//! - 3: Parse failure (the file violates the grammar)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable paths, or unknown section names.
pub const USER_ERROR: i32 = 1;

/// Validation failure: the configuration parsed but is not usable as-is.
pub const VALIDATION_FAILURE: i32 = 2;

/// Parse failure: a line violates the documented grammar.
pub const PARSE_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE, PARSE_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(VALIDATION_FAILURE, 2);
        assert_eq!(PARSE_FAILURE, 3);
    }
}
