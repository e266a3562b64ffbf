//! Constants used throughout dialogwiz

/// Wizard file names in order of preference
pub const WIZARD_FILENAMES: &[&str] = &["wizard.json", "wizard.yaml", "wizard.yml"];

/// Default external dialog program
pub const DEFAULT_DIALOG_PROGRAM: &str = "dialog";

/// Environment variable overriding the dialog program path
pub const DIALOG_PROGRAM_ENV: &str = "DIALOGWIZ_DIALOG";

/// Diagnostic message boxes shown when a submission is rejected
pub mod diagnostics {
    pub const TITLE: &str = "Error Message";

    /// Geometry of the "required value" style boxes
    pub const TALL_HEIGHT: u16 = 8;
    /// Geometry of the format and selection boxes
    pub const SHORT_HEIGHT: u16 = 7;
    pub const WIDTH: u16 = 50;

    pub const EMPTY_VALUE: &str = "\nInvalid data. Required value (non-empty fields).";
    pub const SELECT_ONE: &str = "\nSelect at least one option.";
    pub const INTEGER: &str = "\nInvalid data. Required value (Integer number).";
    pub const DECIMAL: &str = "\nInvalid data. Required value (Decimal number).";
    pub const PORT: &str = "\nInvalid data. Required value (Port number 0-65535).";
    pub const HOST: &str =
        "\nInvalid data. Required value (IP address, hostname or domain name).";
    pub const IP_ADDRESS: &str = "\nInvalid data. Required value (IP address).";
    pub const FILE_NAME: &str =
        "\nInvalid data. Required value (file or folder name without \\ / ? % * : | \" < >).";
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const CANCELLED: i32 = 130;
}

/// Exit statuses reported by the dialog(1) program
pub mod dialog_status {
    pub const OK: i32 = 0;
    pub const CANCEL: i32 = 1;
    pub const HELP: i32 = 2;
    pub const ESC: i32 = 255;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
