/// Error code registry for vpnwatch
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Log input errors
/// - 3000-3999: Endpoint probe errors
/// - 4000-4999: External tool errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1004;
    pub const CONFIG_DUPLICATE_PORT: u16 = 1005;

    // Log input errors (2000-2999)
    pub const INPUT_GENERIC: u16 = 2000;
    pub const INPUT_NOT_FOUND: u16 = 2001;
    pub const INPUT_IO_ERROR: u16 = 2002;
    pub const INPUT_PERMISSION_DENIED: u16 = 2003;

    // Endpoint probe errors (3000-3999)
    pub const PROBE_GENERIC: u16 = 3000;
    pub const PROBE_TIMEOUT: u16 = 3001;
    pub const PROBE_REFUSED: u16 = 3002;
    pub const PROBE_FAULT: u16 = 3003;

    // External tool errors (4000-4999)
    pub const TOOL_GENERIC: u16 = 4000;
    pub const TOOL_UNAVAILABLE: u16 = 4001;
    pub const TOOL_FAILURE: u16 = 4002;
    pub const TOOL_TIMEOUT: u16 = 4003;
    pub const TOOL_SIGNAL_RECEIVED: u16 = 4004;
    pub const TOOL_SPAWN_FAILED: u16 = 4005;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
    pub const OTHER_INTERRUPTED: u16 = 9001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Failed to parse configuration",
        1003 => "Required configuration field is missing",
        1004 => "Invalid value in configuration",
        1005 => "Port declared more than once",

        2000 => "Generic log input error",
        2001 => "Log file not found",
        2002 => "Log file I/O error",
        2003 => "Permission denied reading log file",

        3000 => "Generic probe error",
        3001 => "Endpoint did not answer before the timeout",
        3002 => "Endpoint refused the connection",
        3003 => "Probe failed before reaching the endpoint",

        4000 => "Generic external tool error",
        4001 => "External tool is not installed",
        4002 => "External tool exited with a failure status",
        4003 => "External tool timed out",
        4004 => "External tool received signal",
        4005 => "Failed to spawn external tool",

        9000 => "Generic error",
        9001 => "Interrupted by user",

        _ => "Unknown error code",
    }
}
