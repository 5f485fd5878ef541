// ABOUTME: Centralized constants for the qrpack command-line tool
// ABOUTME: Contains config file locations, exit codes, and UI timings

/// Config file discovery
pub mod config {
    /// Directory under the user's config home
    pub const CONFIG_DIR_NAME: &str = "qrpack";

    /// File name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Project-level config in the working directory
    pub const PROJECT_CONFIG_FILE: &str = "qrpack.toml";
}

/// Process exit codes. Error kinds coming from the SDK map to their own codes
/// via `PackError::exit_code`.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;

    /// Any failure that is not a classified SDK error
    pub const FAILURE: i32 = 1;
}

pub mod timeouts {
    /// Spinner tick interval while waiting on the QR service
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// Environment variables
pub mod env {
    /// Suppresses spinners when set
    pub const QUIET: &str = "QRPACK_QUIET";

    pub const NO_COLOR: &str = "NO_COLOR";
}
