use crate::domain::errors::AppError;
use crate::domain::models::{PatchEntry, PatchOutcome, PatchReport, WhitelistListing};
use std::path::{Path, PathBuf};

const PROFILE_SUFFIX: &str = ".profile";
const WHITELIST: &str = "whitelist";

/// Firejail profile directory (usually `/etc/firejail`).
pub struct ProfileStore {
    dir: PathBuf,
    dry_run: bool,
}

pub fn whitelist_line(path: &str) -> String {
    format!("{WHITELIST} {}", path.trim())
}

/// Targets are non-blank and hold no control characters, so each one is exactly one line.
fn validate_target(path: &str) -> anyhow::Result<()> {
    if path.trim().is_empty() || path.chars().any(char::is_control) {
        return Err(AppError::InvalidWhitelistPath(path.to_string()).into());
    }
    Ok(())
}

fn whitelist_target(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(WHITELIST)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let target = rest.trim();
    (!target.is_empty()).then_some(target)
}

fn has_line(content: &str, line: &str) -> bool {
    content.lines().any(|l| l.trim() == line)
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            dir: dir.into(),
            dry_run,
        }
    }

    /// `<dir>/<name>.profile`; the suffix is optional in `name`.
    pub fn profile_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        let stem = name.strip_suffix(PROFILE_SUFFIX).unwrap_or(name);
        if stem.is_empty() || stem.contains('/') || stem.contains("..") || stem.contains('\0') {
            return Err(AppError::InvalidProfileName(name.to_string()).into());
        }
        Ok(self.dir.join(format!("{stem}{PROFILE_SUFFIX}")))
    }

    fn read_existing(&self, name: &str, path: &Path) -> anyhow::Result<String> {
        if !path.exists() {
            return Err(AppError::ProfileNotFound(path.display().to_string()).into());
        }
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading profile {name} ({}): {e}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        if self.dry_run {
            tracing::info!(path = %path.display(), "dry-run: profile not written");
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("writing profile {}: {e}", path.display()))
    }

    /// Append `whitelist <path>` lines that are not already present. A missing
    /// profile is created.
    pub fn add_whitelist(&self, name: &str, paths: &[String]) -> anyhow::Result<PatchReport> {
        let path = self.profile_path(name)?;
        for target in paths {
            validate_target(target)?;
        }
        let mut content = if path.exists() {
            self.read_existing(name, &path)?
        } else {
            tracing::info!(path = %path.display(), "profile does not exist, creating it");
            String::new()
        };

        let mut entries = Vec::with_capacity(paths.len());
        let mut changed = false;
        for target in paths {
            let line = whitelist_line(target);
            if has_line(&content, &line) {
                tracing::warn!(profile = name, line = %line, "line already present");
                entries.push(PatchEntry {
                    line,
                    outcome: PatchOutcome::AlreadyPresent,
                });
                continue;
            }
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&line);
            content.push('\n');
            changed = true;
            entries.push(PatchEntry {
                line,
                outcome: PatchOutcome::Added,
            });
        }

        if changed {
            self.write(&path, &content)?;
        }
        Ok(PatchReport {
            profile: name.to_string(),
            path: path.display().to_string(),
            entries,
        })
    }

    /// Drop every `whitelist <path>` line. Other lines keep their order and bytes.
    pub fn remove_whitelist(&self, name: &str, paths: &[String]) -> anyhow::Result<PatchReport> {
        let path = self.profile_path(name)?;
        for target in paths {
            validate_target(target)?;
        }
        let content = self.read_existing(name, &path)?;

        let mut kept: Vec<&str> = content.split_inclusive('\n').collect();
        let mut entries = Vec::with_capacity(paths.len());
        for target in paths {
            let line = whitelist_line(target);
            let before = kept.len();
            kept.retain(|l| l.trim() != line);
            if kept.len() == before {
                tracing::warn!(profile = name, line = %line, "line missing");
                entries.push(PatchEntry {
                    line,
                    outcome: PatchOutcome::Missing,
                });
            } else {
                entries.push(PatchEntry {
                    line,
                    outcome: PatchOutcome::Removed,
                });
            }
        }

        if entries.iter().any(|e| e.outcome == PatchOutcome::Removed) {
            self.write(&path, &kept.concat())?;
        }
        Ok(PatchReport {
            profile: name.to_string(),
            path: path.display().to_string(),
            entries,
        })
    }

    pub fn list_whitelist(&self, name: &str) -> anyhow::Result<WhitelistListing> {
        let path = self.profile_path(name)?;
        let content = self.read_existing(name, &path)?;
        Ok(WhitelistListing {
            profile: name.to_string(),
            path: path.display().to_string(),
            entries: content
                .lines()
                .filter_map(whitelist_target)
                .map(str::to_string)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::error_code;
    use tempfile::TempDir;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_is_idempotent() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        let file = tmp.path().join("nginx.profile");
        std::fs::write(&file, "include server.profile\n").expect("seed profile");

        let first = store
            .add_whitelist("nginx", &paths(&["/var/www"]))
            .expect("first add");
        assert_eq!(first.entries[0].outcome, PatchOutcome::Added);
        let after_first = std::fs::read(&file).expect("read");

        let second = store
            .add_whitelist("nginx.profile", &paths(&["/var/www"]))
            .expect("second add");
        assert_eq!(second.entries[0].outcome, PatchOutcome::AlreadyPresent);
        assert_eq!(std::fs::read(&file).expect("read"), after_first);
        assert_eq!(
            String::from_utf8(after_first).expect("utf8"),
            "include server.profile\nwhitelist /var/www\n"
        );
    }

    #[test]
    fn add_inserts_missing_trailing_newline() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        std::fs::write(tmp.path().join("sshd.profile"), "caps.drop all").expect("seed");
        store
            .add_whitelist("sshd", &paths(&["/etc/ssh"]))
            .expect("add");
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("sshd.profile")).expect("read"),
            "caps.drop all\nwhitelist /etc/ssh\n"
        );
    }

    #[test]
    fn add_creates_missing_profile() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path().join("firejail"), false);
        let report = store
            .add_whitelist("vsftpd", &paths(&["/srv/ftp", "/srv/ftp"]))
            .expect("add");
        assert_eq!(report.entries[0].outcome, PatchOutcome::Added);
        assert_eq!(report.entries[1].outcome, PatchOutcome::AlreadyPresent);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("firejail/vsftpd.profile")).expect("read"),
            "whitelist /srv/ftp\n"
        );
    }

    #[test]
    fn indented_duplicate_counts_as_present() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        std::fs::write(tmp.path().join("smbd.profile"), "  whitelist /etc/samba  \n").expect("seed");
        let report = store
            .add_whitelist("smbd", &paths(&["/etc/samba"]))
            .expect("add");
        assert_eq!(report.entries[0].outcome, PatchOutcome::AlreadyPresent);
    }

    #[test]
    fn remove_keeps_other_lines_in_order() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        let file = tmp.path().join("named.profile");
        std::fs::write(
            &file,
            "# bind\nwhitelist /etc/bind\nnoroot\nwhitelist /run/named\n",
        )
        .expect("seed");

        let report = store
            .remove_whitelist("named", &paths(&["/etc/bind", "/var/cache/bind"]))
            .expect("remove");
        assert_eq!(report.entries[0].outcome, PatchOutcome::Removed);
        assert_eq!(report.entries[1].outcome, PatchOutcome::Missing);
        assert_eq!(
            std::fs::read_to_string(&file).expect("read"),
            "# bind\nnoroot\nwhitelist /run/named\n"
        );
    }

    #[test]
    fn remove_from_missing_profile_is_coded() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        let err = store
            .remove_whitelist("dhcpd", &paths(&["/etc/dhcp"]))
            .expect_err("missing profile");
        assert_eq!(error_code(&err), "PROFILE_NOT_FOUND");
    }

    #[test]
    fn list_returns_targets_in_file_order() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        std::fs::write(
            tmp.path().join("cupsd.profile"),
            "whitelist /etc/cups\nwhitelisted-thing\nwhitelist\nwhitelist   /var/spool/cups\n",
        )
        .expect("seed");
        let listing = store.list_whitelist("cupsd").expect("list");
        assert_eq!(listing.entries, vec!["/etc/cups", "/var/spool/cups"]);
    }

    #[test]
    fn dry_run_never_writes() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), true);
        let report = store
            .add_whitelist("unbound", &paths(&["/etc/unbound"]))
            .expect("add");
        assert_eq!(report.entries[0].outcome, PatchOutcome::Added);
        assert!(!tmp.path().join("unbound.profile").exists());
    }

    #[test]
    fn blank_or_multiline_targets_are_rejected_before_writing() {
        let tmp = TempDir::new().expect("temp dir");
        let store = ProfileStore::new(tmp.path(), false);
        let file = tmp.path().join("nginx.profile");
        std::fs::write(&file, "noroot\n").expect("seed");

        for bad in ["", "   ", "/srv\nignore noroot", "/srv\r", "/srv\0x"] {
            let err = store
                .add_whitelist("nginx", &paths(&["/var/www", bad]))
                .expect_err("bad target");
            assert_eq!(error_code(&err), "INVALID_WHITELIST_PATH", "target {bad:?}");
            let err = store
                .remove_whitelist("nginx", &paths(&[bad]))
                .expect_err("bad target");
            assert_eq!(error_code(&err), "INVALID_WHITELIST_PATH", "target {bad:?}");
        }
        assert_eq!(std::fs::read_to_string(&file).expect("read"), "noroot\n");
        assert!(!tmp.path().join("sshd.profile").exists());
        store
            .add_whitelist("sshd", &paths(&[""]))
            .expect_err("blank target");
        assert!(!tmp.path().join("sshd.profile").exists());
    }

    #[test]
    fn rejects_path_like_names() {
        let store = ProfileStore::new("/etc/firejail", true);
        for bad in ["", "../passwd", "a/b", ".profile"] {
            let err = store.profile_path(bad).expect_err("invalid name");
            assert_eq!(error_code(&err), "INVALID_PROFILE_NAME", "name {bad:?}");
        }
    }
}
