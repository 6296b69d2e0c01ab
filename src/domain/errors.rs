#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("no supported package manager found (looked for apt-get, dnf, zypper, yum, pacman)")]
    NoPackageManager,
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("profile not found: {0}")]
    ProfileNotFound(String),
    #[error("invalid profile name: {0:?}")]
    InvalidProfileName(String),
    #[error("invalid whitelist path: {0:?}")]
    InvalidWhitelistPath(String),
    #[error("command failed with exit code {code}: {command}")]
    CommandFailed { command: String, code: i32 },
    #[error("invalid config {path}: {message}")]
    ConfigInvalid { path: String, message: String },
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NoPackageManager => "NO_PACKAGE_MANAGER",
            AppError::UnknownService(_) => "UNKNOWN_SERVICE",
            AppError::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            AppError::InvalidProfileName(_) => "INVALID_PROFILE_NAME",
            AppError::InvalidWhitelistPath(_) => "INVALID_WHITELIST_PATH",
            AppError::CommandFailed { .. } => "COMMAND_FAILED",
            AppError::ConfigInvalid { .. } => "CONFIG_INVALID",
        }
    }
}

/// Error code for an arbitrary failure; anything not raised as `AppError` is `INTERNAL`.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<AppError>()
        .map(AppError::code)
        .unwrap_or("INTERNAL")
}
