use crate::domain::errors::AppError;
use crate::domain::models::{InstallMethod, InstallReport, PackageManager, FIREJAIL_PACKAGE};
use crate::services::runner::{CommandLine, CommandRunner};
use std::path::Path;

pub struct InstallPlan<'a> {
    pub method: InstallMethod,
    pub package_manager: PackageManager,
    pub use_sudo: bool,
    pub git_url: &'a str,
    pub checkout_dir: &'a Path,
}

pub fn package_steps(pm: PackageManager, use_sudo: bool) -> Vec<CommandLine> {
    let mut steps = Vec::new();
    if let Some(refresh) = pm.refresh_args() {
        steps.push(CommandLine::new(pm.binary()).args(refresh).privileged(use_sudo));
    }
    steps.push(
        CommandLine::new(pm.binary())
            .args(pm.install_args(&[FIREJAIL_PACKAGE]))
            .privileged(use_sudo),
    );
    steps
}

pub fn source_steps(plan: &InstallPlan<'_>) -> Vec<CommandLine> {
    let pm = plan.package_manager;
    let dir = plan.checkout_dir;
    let mut steps = Vec::new();
    if let Some(refresh) = pm.refresh_args() {
        steps.push(CommandLine::new(pm.binary()).args(refresh).privileged(plan.use_sudo));
    }
    steps.push(
        CommandLine::new(pm.binary())
            .args(pm.install_args(pm.build_dependencies()))
            .privileged(plan.use_sudo),
    );
    if dir.join(".git").is_dir() {
        steps.push(
            CommandLine::new("git")
                .arg("-C")
                .arg(dir.to_string_lossy())
                .args(["pull", "--ff-only"]),
        );
    } else {
        steps.push(
            CommandLine::new("git")
                .args(["clone", "--depth", "1", plan.git_url])
                .arg(dir.to_string_lossy()),
        );
    }
    steps.push(CommandLine::new("./configure").current_dir(dir));
    steps.push(CommandLine::new("make").current_dir(dir));
    steps.push(
        CommandLine::new("make")
            .arg("install-strip")
            .current_dir(dir)
            .privileged(plan.use_sudo),
    );
    steps
}

/// Run `steps` in order, stopping at the first non-zero exit.
pub fn run_steps(runner: &dyn CommandRunner, steps: &[CommandLine]) -> anyhow::Result<Vec<String>> {
    let mut done = Vec::with_capacity(steps.len());
    for step in steps {
        let rendered = step.render();
        let code = runner.run(step)?;
        if code != 0 {
            return Err(AppError::CommandFailed {
                command: rendered,
                code,
            }
            .into());
        }
        done.push(rendered);
    }
    Ok(done)
}

/// Install firejail. `already_installed` short-circuits the package method unless forced.
pub fn install(
    runner: &dyn CommandRunner,
    plan: &InstallPlan<'_>,
    already_installed: bool,
    force: bool,
) -> anyhow::Result<InstallReport> {
    if plan.method == InstallMethod::Package && already_installed && !force {
        tracing::info!("firejail already installed, nothing to do");
        return Ok(InstallReport {
            method: plan.method,
            package_manager: plan.package_manager,
            status: "already_installed".to_string(),
            commands: Vec::new(),
        });
    }

    let steps = match plan.method {
        InstallMethod::Package => package_steps(plan.package_manager, plan.use_sudo),
        InstallMethod::Source => {
            if !runner.is_dry_run() {
                if let Some(parent) = plan.checkout_dir.parent() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            source_steps(plan)
        }
    };
    let commands = run_steps(runner, &steps)?;

    Ok(InstallReport {
        method: plan.method,
        package_manager: plan.package_manager,
        status: if runner.is_dry_run() {
            "planned"
        } else {
            "installed"
        }
        .to_string(),
        commands,
    })
}
