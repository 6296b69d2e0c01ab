use crate::domain::models::{InstallMethod, PackageManager};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jailkeeper",
    version,
    about = "Install firejail, patch its profiles and start system daemons inside it"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Print the commands and profile edits without performing them"
    )]
    pub dry_run: bool,
    #[arg(long, global = true, help = "Do not prefix privileged commands with sudo")]
    pub no_sudo: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.config/jailkeeper/config.toml)"
    )]
    pub config: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Firejail profile directory (default: /etc/firejail)"
    )]
    pub profile_dir: Option<String>,
    #[arg(
        long,
        global = true,
        value_enum,
        help = "Skip detection and use this package manager"
    )]
    pub package_manager: Option<PackageManager>,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the detected package manager family
    Detect,
    /// Install firejail
    Install {
        #[arg(long, value_enum, default_value_t = InstallMethod::Package)]
        method: InstallMethod,
        #[arg(long, default_value_t = false, help = "Install even if firejail is already on PATH")]
        force: bool,
        #[arg(long, help = "Git repository for source builds")]
        git_url: Option<String>,
        #[arg(long, help = "Checkout directory for source builds")]
        checkout_dir: Option<String>,
    },
    /// Check that the host is ready to launch sandboxed services
    Doctor,
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommands,
    },
    Services {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Start one or more services inside firejail
    Launch {
        #[arg(required = true)]
        services: Vec<String>,
        #[arg(long, default_value_t = false, help = "Do not wait for a single service")]
        background: bool,
    },
    /// Interactive service menu
    Menu,
}

#[derive(Subcommand, Debug)]
pub enum WhitelistCommands {
    Add {
        profile: String,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    Remove {
        profile: String,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    List {
        profile: String,
    },
    /// Write the preset whitelist of each service into its profile
    Apply {
        #[arg(required = true)]
        services: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    List,
    Show { service: String },
}
