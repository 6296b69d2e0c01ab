use crate::*;
use crate::domain::models::LaunchReport;
use crate::services::launcher::{launch_command, launch_many};
use crate::services::menu::run_menu;
use std::io::{self, Write};

fn jail_options(settings: &Settings) -> JailOptions<'_> {
    JailOptions {
        firejail_bin: &settings.firejail_bin,
        firejail_args: &settings.firejail_args,
        use_sudo: settings.use_sudo,
    }
}

fn audit_launches(settings: &Settings, reports: &[LaunchReport]) {
    if settings.dry_run {
        return;
    }
    for r in reports {
        audit(
            "launch",
            serde_json::json!({
                "service": r.service,
                "command": r.command,
                "mode": r.mode,
                "status": r.status,
                "pid": r.pid,
            }),
        );
    }
}

/// Exit code for a batch: the child's code for a single foreground run,
/// 1 when any background spawn failed, 0 otherwise.
fn batch_exit_code(reports: &[LaunchReport]) -> i32 {
    if let [only] = reports {
        if let Some(code) = only.exit_code {
            return code;
        }
    }
    if reports.iter().any(|r| r.status == "failed") {
        1
    } else {
        0
    }
}

pub fn handle_runtime_commands(
    cli: &Cli,
    settings: &Settings,
    runner: &dyn CommandRunner,
) -> anyhow::Result<i32> {
    let jail = jail_options(settings);

    match &cli.command {
        Commands::Services { command } => match command {
            ServiceCommands::List => {
                print_out(settings.json, &settings.services, |s| {
                    format!(
                        "{}\t{}\t{}",
                        s.name,
                        launch_command(s, &jail).render(),
                        s.description
                    )
                })?;
            }
            ServiceCommands::Show { service } => {
                let entry = settings.find_service(service)?;
                let view = ServiceView {
                    service: entry.clone(),
                    command: launch_command(entry, &jail).render(),
                };
                print_one(settings.json, view, |v| {
                    let mut out = format!(
                        "name: {}\ndescription: {}\ncommand: {}\nprofile: {}",
                        v.service.name,
                        v.service.description,
                        v.command,
                        v.service.profile_name()
                    );
                    if !v.service.whitelist.is_empty() {
                        out.push_str(&format!("\nwhitelist: {}", v.service.whitelist.join(", ")));
                    }
                    out
                })?;
            }
        },
        Commands::Launch {
            services,
            background,
        } => {
            let targets = services
                .iter()
                .map(|name| settings.find_service(name))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let reports = launch_many(runner, &targets, &jail, *background)?;
            audit_launches(settings, &reports);
            let code = batch_exit_code(&reports);
            print_out(settings.json, &reports, |r| match (&r.error, r.pid) {
                (Some(err), _) => format!("{}\tfailed\t{}", r.service, err),
                (None, Some(pid)) => {
                    format!("{}\t{}\tpid={}\t{}", r.service, r.status, pid, r.command)
                }
                (None, None) => format!("{}\t{}\t{}", r.service, r.status, r.command),
            })?;
            return Ok(code);
        }
        Commands::Menu => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            // Prompts go to stderr under --json so stdout stays a single document.
            let reports = if settings.json {
                run_menu(&mut input, &mut io::stderr(), runner, &settings.services, &jail)?
            } else {
                let mut stdout = io::stdout();
                let reports =
                    run_menu(&mut input, &mut stdout, runner, &settings.services, &jail)?;
                stdout.flush()?;
                reports
            };
            audit_launches(settings, &reports);
            if settings.json {
                print_out(true, &reports, |_| String::new())?;
            }
            return Ok(batch_exit_code(&reports));
        }
        other => anyhow::bail!("unhandled command: {other:?}"),
    }

    Ok(0)
}
