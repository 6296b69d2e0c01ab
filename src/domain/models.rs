use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_DIR: &str = "/etc/firejail";
pub const DEFAULT_FIREJAIL_BIN: &str = "firejail";
pub const DEFAULT_GIT_URL: &str = "https://github.com/netblue30/firejail.git";
pub const FIREJAIL_PACKAGE: &str = "firejail";

fn default_true() -> bool {
    true
}

fn default_firejail_bin() -> String {
    DEFAULT_FIREJAIL_BIN.to_string()
}

fn default_git_url() -> String {
    DEFAULT_GIT_URL.to_string()
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Dnf,
    Zypper,
    Yum,
    Pacman,
}

impl PackageManager {
    /// Probe order: the first family found on `PATH` wins.
    pub const PROBE_ORDER: [PackageManager; 5] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Zypper,
        PackageManager::Yum,
        PackageManager::Pacman,
    ];

    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Zypper => "zypper",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
            PackageManager::Zypper => "zypper",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
        }
    }

    pub fn install_args(self, packages: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = match self {
            PackageManager::Apt | PackageManager::Dnf | PackageManager::Yum => {
                vec!["install".into(), "-y".into()]
            }
            PackageManager::Zypper => vec!["--non-interactive".into(), "install".into()],
            PackageManager::Pacman => {
                vec!["-S".into(), "--noconfirm".into(), "--needed".into()]
            }
        };
        args.extend(packages.iter().map(|p| p.to_string()));
        args
    }

    /// Metadata refresh to run before installing, if the family needs one.
    pub fn refresh_args(self) -> Option<Vec<String>> {
        match self {
            PackageManager::Apt => Some(vec!["update".into()]),
            PackageManager::Zypper => Some(vec!["--non-interactive".into(), "refresh".into()]),
            PackageManager::Dnf | PackageManager::Yum | PackageManager::Pacman => None,
        }
    }

    pub fn build_dependencies(self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt => &["git", "gcc", "make", "pkg-config", "libapparmor-dev"],
            PackageManager::Dnf | PackageManager::Yum => &["git", "gcc", "make", "pkgconfig"],
            PackageManager::Zypper => &["git", "gcc", "make", "pkg-config"],
            PackageManager::Pacman => &["git", "base-devel"],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    Package,
    Source,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub package_manager: Option<PackageManager>,
    #[serde(default = "default_true")]
    pub use_sudo: bool,
    #[serde(default = "default_firejail_bin")]
    pub firejail_bin: String,
    #[serde(default)]
    pub firejail_args: Vec<String>,
    #[serde(default)]
    pub profile_dir: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            package_manager: None,
            use_sudo: true,
            firejail_bin: default_firejail_bin(),
            firejail_args: Vec::new(),
            profile_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_git_url")]
    pub git_url: String,
    #[serde(default)]
    pub checkout_dir: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            git_url: default_git_url(),
            checkout_dir: None,
        }
    }
}

/// Owned catalog entry; built-ins are converted from `catalog::BUILTIN_SERVICES`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub binary: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Profile the whitelist presets are written to; defaults to the service name.
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl ServiceEntry {
    pub fn profile_name(&self) -> &str {
        self.profile.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Serialize, Clone)]
pub struct Detection {
    pub package_manager: PackageManager,
    pub binary_path: Option<String>,
    pub source: String,
}

#[derive(Serialize)]
pub struct InstallReport {
    pub method: InstallMethod,
    pub package_manager: PackageManager,
    pub status: String,
    pub commands: Vec<String>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    Added,
    AlreadyPresent,
    Removed,
    Missing,
}

#[derive(Serialize, Debug)]
pub struct PatchEntry {
    pub line: String,
    pub outcome: PatchOutcome,
}

#[derive(Serialize, Debug)]
pub struct PatchReport {
    pub profile: String,
    pub path: String,
    pub entries: Vec<PatchEntry>,
}

#[derive(Serialize)]
pub struct WhitelistListing {
    pub profile: String,
    pub path: String,
    pub entries: Vec<String>,
}

#[derive(Serialize)]
pub struct ServiceView {
    #[serde(flatten)]
    pub service: ServiceEntry,
    pub command: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct LaunchReport {
    pub service: String,
    pub command: String,
    pub mode: String,
    pub status: String,
    pub pid: Option<u32>,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}
