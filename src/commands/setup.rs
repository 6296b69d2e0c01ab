use crate::*;
use crate::services::detect::{detect, find_program};
use crate::services::doctor::doctor;
use crate::services::installer::{install, InstallPlan};

pub fn handle_setup_commands(
    cli: &Cli,
    settings: &Settings,
    runner: &dyn CommandRunner,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Detect => {
            let detection = detect(settings.package_manager)?;
            print_one(settings.json, detection, |d| {
                format!(
                    "{}\t{}\t{}",
                    d.package_manager.name(),
                    d.binary_path.as_deref().unwrap_or("-"),
                    d.source
                )
            })?;
        }
        Commands::Install {
            method,
            force,
            git_url,
            checkout_dir,
        } => {
            let detection = detect(settings.package_manager)?;
            let checkout_dir = checkout_dir
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| settings.checkout_dir.clone());
            let plan = InstallPlan {
                method: *method,
                package_manager: detection.package_manager,
                use_sudo: settings.use_sudo,
                git_url: git_url.as_deref().unwrap_or(&settings.git_url),
                checkout_dir: &checkout_dir,
            };
            let already_installed = find_program(&settings.firejail_bin).is_some();
            let report = install(runner, &plan, already_installed, *force)?;
            if !settings.dry_run && report.status == "installed" {
                audit(
                    "install",
                    serde_json::json!({
                        "method": report.method,
                        "package_manager": report.package_manager,
                        "commands": report.commands,
                    }),
                );
            }
            if settings.json {
                print_one(true, report, |_| String::new())?;
            } else {
                for c in &report.commands {
                    println!("{}{}", if settings.dry_run { "would run: " } else { "ran: " }, c);
                }
                let method = match report.method {
                    InstallMethod::Package => "package",
                    InstallMethod::Source => "source",
                };
                println!(
                    "firejail {} ({} via {})",
                    report.status.replace('_', " "),
                    method,
                    report.package_manager.name()
                );
            }
        }
        Commands::Doctor => {
            let report = doctor(settings);
            if settings.json {
                print_one(true, report, |_| String::new())?;
            } else {
                println!("overall: {}", report.overall);
                for c in report.checks {
                    println!("{}\t{}", c.name, c.status);
                }
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
