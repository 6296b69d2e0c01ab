use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    cargo_bin_cmd!("jailkeeper")
}

#[test]
fn services_list_text() {
    cmd()
        .args(["--no-sudo", "services", "list"])
        .env("HOME", "/nonexistent-jailkeeper-home")
        .assert()
        .success()
        .stdout(contains("sshd\tfirejail /usr/sbin/sshd -D\tOpenSSH server"));
}

#[test]
fn launch_requires_a_service() {
    cmd().arg("launch").assert().failure().stderr(contains("<SERVICES>"));
}

#[test]
fn install_rejects_unknown_method() {
    cmd()
        .args(["install", "--method", "curl"])
        .assert()
        .failure()
        .stderr(contains("invalid value"));
}
