use crate::domain::models::{LaunchReport, ServiceEntry};
use crate::services::runner::{CommandLine, CommandRunner};

/// How firejail is invoked around a service.
pub struct JailOptions<'a> {
    pub firejail_bin: &'a str,
    pub firejail_args: &'a [String],
    pub use_sudo: bool,
}

/// `[sudo] firejail <firejail_args...> <binary> <args...>`
pub fn launch_command(service: &ServiceEntry, jail: &JailOptions<'_>) -> CommandLine {
    CommandLine::new(jail.firejail_bin)
        .args(jail.firejail_args.iter().cloned())
        .arg(service.binary.clone())
        .args(service.args.iter().cloned())
        .privileged(jail.use_sudo)
}

/// Run one service and wait for it. A start failure is an error; the exit code is reported.
pub fn launch_foreground(
    runner: &dyn CommandRunner,
    service: &ServiceEntry,
    jail: &JailOptions<'_>,
) -> anyhow::Result<LaunchReport> {
    let cmd = launch_command(service, jail);
    let code = runner.run(&cmd)?;
    Ok(LaunchReport {
        service: service.name.clone(),
        command: cmd.render(),
        mode: "foreground".to_string(),
        status: if runner.is_dry_run() {
            "planned".to_string()
        } else {
            "exited".to_string()
        },
        pid: None,
        exit_code: Some(code),
        error: None,
    })
}

/// Start one service without waiting. Spawn errors are folded into the report.
pub fn launch_background(
    runner: &dyn CommandRunner,
    service: &ServiceEntry,
    jail: &JailOptions<'_>,
) -> LaunchReport {
    let cmd = launch_command(service, jail);
    let rendered = cmd.render();
    let (status, pid, error) = match runner.spawn(&cmd) {
        Ok(pid) if runner.is_dry_run() => ("planned", pid, None),
        Ok(pid) => ("started", pid, None),
        Err(e) => {
            tracing::error!(service = %service.name, error = %e, "launch failed");
            ("failed", None, Some(e.to_string()))
        }
    };
    LaunchReport {
        service: service.name.clone(),
        command: rendered,
        mode: "background".to_string(),
        status: status.to_string(),
        pid,
        exit_code: None,
        error,
    }
}

/// Launch a batch. A single service runs in the foreground unless `background` is set;
/// several services are always backgrounded.
pub fn launch_many(
    runner: &dyn CommandRunner,
    services: &[&ServiceEntry],
    jail: &JailOptions<'_>,
    background: bool,
) -> anyhow::Result<Vec<LaunchReport>> {
    if let [only] = services {
        if !background {
            return Ok(vec![launch_foreground(runner, only, jail)?]);
        }
    }
    Ok(services
        .iter()
        .map(|s| launch_background(runner, s, jail))
        .collect())
}
