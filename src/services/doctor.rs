use crate::domain::models::{CheckItem, DoctorReport};
use crate::services::config::Settings;
use crate::services::detect::{detect, find_program};

fn check(name: &str, ok: bool, missing: &str) -> CheckItem {
    CheckItem {
        name: name.to_string(),
        status: if ok { "ok" } else { missing }.to_string(),
    }
}

pub fn doctor(settings: &Settings) -> DoctorReport {
    let checks = vec![
        check(
            "package_manager",
            detect(settings.package_manager).is_ok(),
            "missing",
        ),
        check(
            "firejail",
            find_program(&settings.firejail_bin).is_some(),
            "missing",
        ),
        if settings.use_sudo {
            check("sudo", find_program("sudo").is_some(), "missing")
        } else {
            CheckItem {
                name: "sudo".to_string(),
                status: "not_required".to_string(),
            }
        },
        check("profile_dir", settings.profile_dir.is_dir(), "missing"),
        check("git", find_program("git").is_some(), "missing"),
    ];

    let overall = if checks
        .iter()
        .all(|c| c.status == "ok" || c.status == "not_required")
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport { overall, checks }
}
