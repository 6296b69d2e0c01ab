use crate::*;
use crate::domain::models::PatchReport;
use crate::services::profiles::ProfileStore;

fn print_patch(json: bool, reports: Vec<PatchReport>) -> anyhow::Result<()> {
    if json {
        return print_out(true, &reports, |_| String::new());
    }
    for r in &reports {
        for e in &r.entries {
            let outcome = serde_json::to_value(e.outcome)?;
            println!("{}\t{}\t{}", r.path, outcome.as_str().unwrap_or(""), e.line);
        }
    }
    Ok(())
}

fn audit_patch(settings: &Settings, action: &str, reports: &[PatchReport]) {
    if settings.dry_run {
        return;
    }
    for r in reports {
        audit(
            action,
            serde_json::json!({"profile": r.profile, "path": r.path, "entries": r.entries}),
        );
    }
}

pub fn handle_whitelist_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    let Commands::Whitelist { command } = &cli.command else {
        return Ok(false);
    };
    let store = ProfileStore::new(&settings.profile_dir, settings.dry_run);

    match command {
        WhitelistCommands::Add { profile, paths } => {
            let reports = vec![store.add_whitelist(profile, paths)?];
            audit_patch(settings, "whitelist_add", &reports);
            print_patch(settings.json, reports)?;
        }
        WhitelistCommands::Remove { profile, paths } => {
            let reports = vec![store.remove_whitelist(profile, paths)?];
            audit_patch(settings, "whitelist_remove", &reports);
            print_patch(settings.json, reports)?;
        }
        WhitelistCommands::List { profile } => {
            let listing = store.list_whitelist(profile)?;
            if settings.json {
                print_one(true, listing, |_| String::new())?;
            } else {
                for entry in &listing.entries {
                    println!("{entry}");
                }
            }
        }
        WhitelistCommands::Apply { services } => {
            let targets = services
                .iter()
                .map(|name| settings.find_service(name))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let mut reports = Vec::with_capacity(targets.len());
            for service in targets {
                if service.whitelist.is_empty() {
                    tracing::warn!(service = %service.name, "service has no whitelist preset");
                    continue;
                }
                reports.push(store.add_whitelist(service.profile_name(), &service.whitelist)?);
            }
            audit_patch(settings, "whitelist_apply", &reports);
            print_patch(settings.json, reports)?;
        }
    }

    Ok(true)
}
