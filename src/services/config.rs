use crate::cli::Cli;
use crate::domain::catalog::BUILTIN_SERVICES;
use crate::domain::errors::AppError;
use crate::domain::models::{ConfigFile, PackageManager, ServiceEntry, DEFAULT_PROFILE_DIR};
use std::path::{Path, PathBuf};

/// Effective settings after merging CLI flags, the config file and defaults.
pub struct Settings {
    pub json: bool,
    pub dry_run: bool,
    pub use_sudo: bool,
    pub firejail_bin: String,
    pub firejail_args: Vec<String>,
    pub profile_dir: PathBuf,
    /// Forced package manager and where it came from (`override` or `config`).
    pub package_manager: Option<(PackageManager, &'static str)>,
    pub git_url: String,
    pub checkout_dir: PathBuf,
    pub services: Vec<ServiceEntry>,
}

pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/jailkeeper/config.toml"))
}

fn default_checkout_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".local/share/jailkeeper/src/firejail"),
        Err(_) => std::env::temp_dir().join("jailkeeper-firejail-src"),
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}

pub fn load_config(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| {
        AppError::ConfigInvalid {
            path: path.display().to_string(),
            message: e.message().to_string(),
        }
        .into()
    })
}

/// Built-in catalog with config entries replacing built-ins of the same name
/// and new names appended in file order.
pub fn merge_services(extra: &[ServiceEntry]) -> Vec<ServiceEntry> {
    let mut out: Vec<ServiceEntry> = BUILTIN_SERVICES.iter().map(|s| s.to_entry()).collect();
    for entry in extra {
        match out.iter_mut().find(|s| s.name == entry.name) {
            Some(existing) => *existing = entry.clone(),
            None => out.push(entry.clone()),
        }
    }
    out
}

impl Settings {
    pub fn resolve(cli: &Cli, config: ConfigFile) -> Self {
        let package_manager = match (cli.package_manager, config.general.package_manager) {
            (Some(pm), _) => Some((pm, "override")),
            (None, Some(pm)) => Some((pm, "config")),
            (None, None) => None,
        };
        let profile_dir = cli
            .profile_dir
            .as_deref()
            .or(config.general.profile_dir.as_deref())
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_DIR));
        let checkout_dir = config
            .source
            .checkout_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(default_checkout_dir);

        Self {
            json: cli.json,
            dry_run: cli.dry_run,
            use_sudo: config.general.use_sudo && !cli.no_sudo,
            firejail_bin: config.general.firejail_bin,
            firejail_args: config.general.firejail_args,
            profile_dir,
            package_manager,
            git_url: config.source.git_url,
            checkout_dir,
            services: merge_services(&config.services),
        }
    }

    pub fn find_service(&self, name: &str) -> anyhow::Result<&ServiceEntry> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AppError::UnknownService(name.to_string()).into())
    }
}
