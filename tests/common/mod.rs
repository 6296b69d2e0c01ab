#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub bin: PathBuf,
    pub profiles: PathBuf,
}

impl TestEnv {
    /// Isolated HOME, an empty PATH directory and an empty profile directory.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let bin = tmp.path().join("bin");
        let profiles = tmp.path().join("firejail");
        for dir in [&home, &bin, &profiles] {
            fs::create_dir_all(dir).expect("create test dir");
        }
        Self {
            _tmp: tmp,
            home,
            bin,
            profiles,
        }
    }

    /// Put an executable stub named `name` on the test PATH.
    pub fn with_tool(self, name: &str) -> Self {
        self.with_script(name, "exit 0")
    }

    /// Like `with_tool`, but the stub runs `body` under `/bin/sh`.
    pub fn with_script(self, name: &str, body: &str) -> Self {
        let path = self.bin.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
        self
    }

    pub fn write_profile(&self, name: &str, content: &str) -> PathBuf {
        let path = self.profiles.join(format!("{name}.profile"));
        fs::write(&path, content).expect("write profile");
        path
    }

    pub fn read_profile(&self, name: &str) -> String {
        fs::read_to_string(self.profiles.join(format!("{name}.profile"))).expect("read profile")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.home.join(".config/jailkeeper/config.toml");
        fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
        fs::write(path, content).expect("write config");
    }

    pub fn audit_log(&self) -> Option<String> {
        fs::read_to_string(self.home.join(".config/jailkeeper/audit.jsonl")).ok()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("jailkeeper");
        cmd.env("HOME", &self.home)
            .env("PATH", &self.bin)
            .env_remove("JAILKEEPER_LOG")
            .arg("--profile-dir")
            .arg(&self.profiles);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf8 path")
}
