//! Exit codes and reason formatting for delegated orchestrator calls

/// Exit codes used by stackctl itself
pub mod codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    /// Unrecognized or missing command
    pub const USAGE: i32 = 1;
    pub const CANNOT_EXECUTE: i32 = 126;
    pub const COMMAND_NOT_FOUND: i32 = 127;
    pub const SIGNAL_BASE: i32 = 128;
}

/// Format an orchestrator exit code into a human-readable reason
pub fn format_exit_reason(exit_code: i32) -> String {
    match exit_code {
        codes::SUCCESS => "Exited normally".to_string(),
        codes::GENERAL_ERROR => "General error".to_string(),
        2 => "Misuse of shell builtin".to_string(),
        codes::CANNOT_EXECUTE => "Command cannot execute".to_string(),
        codes::COMMAND_NOT_FOUND => "Command not found".to_string(),
        code if code > codes::SIGNAL_BASE => {
            format!("Terminated by signal {}", code - codes::SIGNAL_BASE)
        }
        _ => "Unknown error".to_string(),
    }
}

/// Map a child's exit code to the code stackctl exits with.
/// A child killed by a signal has no code and maps to a general error.
pub fn propagate(code: Option<i32>) -> i32 {
    match code {
        Some(c) if c != codes::SUCCESS => c,
        Some(_) => codes::SUCCESS,
        None => codes::GENERAL_ERROR,
    }
}
