use crate::domain::errors::AppError;
use crate::domain::models::{Detection, PackageManager};
use std::path::PathBuf;

/// Locate `program` on `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Probe in `PackageManager::PROBE_ORDER`, using `lookup` to resolve binaries.
pub fn probe_with(lookup: impl Fn(&str) -> Option<PathBuf>) -> Option<(PackageManager, PathBuf)> {
    PackageManager::PROBE_ORDER
        .iter()
        .find_map(|pm| lookup(pm.binary()).map(|path| (*pm, path)))
}

/// Resolve the package manager family. A forced choice (CLI flag or config) wins
/// over probing; nothing here executes a program.
pub fn detect(forced: Option<(PackageManager, &str)>) -> anyhow::Result<Detection> {
    if let Some((pm, source)) = forced {
        tracing::debug!(package_manager = pm.name(), source, "package manager forced");
        return Ok(Detection {
            package_manager: pm,
            binary_path: find_program(pm.binary()).map(|p| p.to_string_lossy().to_string()),
            source: source.to_string(),
        });
    }

    let (pm, path) = probe_with(find_program).ok_or(AppError::NoPackageManager)?;
    tracing::info!(package_manager = pm.name(), path = %path.display(), "package manager detected");
    Ok(Detection {
        package_manager: pm,
        binary_path: Some(path.to_string_lossy().to_string()),
        source: "probe".to_string(),
    })
}
