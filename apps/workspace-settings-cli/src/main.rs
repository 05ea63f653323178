mod config;
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use workspace_settings::{
    FunctionalRole, NotificationEvent, NotificationSettingsMap, Requester,
    SaveWorkspaceUserSettingsRequest, UserId, WorkspaceId, WorkspaceSettingsApi,
    WorkspaceSettingsModule,
};

use crate::config::{AppConfig, CliOverrides, DatabaseConfig};

/// Workspace Settings CLI - manage per-user workspace notification settings
#[derive(Parser)]
#[command(name = "workspace-settings-cli")]
#[command(about = "Manage per-user notification settings of secure workspaces")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database DSN override (overrides config)
    #[arg(long)]
    dsn: Option<String>,

    /// Switch the workspace feature on or off for this run (overrides config)
    #[arg(long)]
    workspace_enabled: Option<bool>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Save the notification settings of a user in a workspace
    Save(SaveArgs),
    /// Show the effective notification settings of a user in a workspace
    Show(TargetArgs),
    /// Validate configuration and exit
    Check,
}

#[derive(Args)]
struct TargetArgs {
    /// Workspace (package) id
    #[arg(long)]
    workspace: i64,

    /// User whose settings are addressed
    #[arg(long)]
    user: i64,

    #[command(flatten)]
    requester: RequesterArgs,
}

#[derive(Args)]
struct RequesterArgs {
    /// User id of the acting requester
    #[arg(long)]
    requester: i64,

    /// Act as a root requester
    #[arg(long)]
    root: bool,

    /// Functional role of the requester (repeatable)
    #[arg(long = "role")]
    roles: Vec<FunctionalRole>,
}

impl RequesterArgs {
    fn to_requester(&self) -> Requester {
        let base = if self.root {
            Requester::root(UserId(self.requester))
        } else {
            Requester::new(UserId(self.requester))
        };
        self.roles.iter().fold(base, |r, role| r.with_role(*role))
    }
}

#[derive(Args)]
struct SaveArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Setting as EVENT=true|false (repeatable); unset events are stored as enabled
    #[arg(long = "set", value_parser = parse_setting)]
    settings: Vec<(NotificationEvent, bool)>,
}

fn parse_setting(raw: &str) -> Result<(NotificationEvent, bool), String> {
    let (event, enabled) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected EVENT=true|false, got '{raw}'"))?;
    let event = event
        .trim()
        .parse::<NotificationEvent>()
        .map_err(|e| e.to_string())?;
    let enabled = enabled
        .trim()
        .parse::<bool>()
        .map_err(|_| format!("expected true or false for {event}, got '{enabled}'"))?;
    Ok((event, enabled))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !path.is_file()
    {
        bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        dsn: cli.dsn,
        workspace_enabled: cli.workspace_enabled,
    });

    logging::init(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Migrate => migrate(&config).await,
        Commands::Save(args) => save(&config, args).await,
        Commands::Show(args) => show(&config, &args).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.dsn.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", config.dsn))?;
    tracing::debug!("Database connection established");
    Ok(db)
}

async fn migrate(config: &AppConfig) -> Result<()> {
    let db = connect(&config.database).await?;
    WorkspaceSettingsModule::migrate(&db).await?;
    println!("Migrations applied");
    Ok(())
}

async fn save(config: &AppConfig, args: SaveArgs) -> Result<()> {
    let db = connect(&config.database).await?;
    let module = WorkspaceSettingsModule::new(db, &config.workspace_settings);

    let settings: NotificationSettingsMap = args.settings.into_iter().collect();
    let request = SaveWorkspaceUserSettingsRequest::new(
        WorkspaceId(args.target.workspace),
        UserId(args.target.user),
        args.target.requester.to_requester(),
        settings,
    );

    let result = module.client().save_workspace_user_settings(request).await;
    println!("{}", result.code());
    if !result.is_success() {
        bail!("save failed with {}", result.code());
    }
    Ok(())
}

async fn show(config: &AppConfig, args: &TargetArgs) -> Result<()> {
    let db = connect(&config.database).await?;
    let module = WorkspaceSettingsModule::new(db, &config.workspace_settings);

    let settings = module
        .client()
        .get_workspace_user_settings(
            &args.requester.to_requester(),
            WorkspaceId(args.workspace),
            UserId(args.user),
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setting_accepts_wire_names() {
        assert_eq!(
            parse_setting("FILE_UPLOADED=false"),
            Ok((NotificationEvent::FileUploaded, false))
        );
        assert_eq!(
            parse_setting("user_self_remove = true"),
            Ok((NotificationEvent::UserSelfRemoved, true))
        );
    }

    #[test]
    fn test_parse_setting_rejects_malformed_input() {
        assert!(parse_setting("FILE_UPLOADED").is_err());
        assert!(parse_setting("FILE_UPLOADED=maybe").is_err());
        assert!(parse_setting("FILE_RENAMED=true").is_err());
    }

    #[test]
    fn test_requester_args_build_requester() {
        let cli = Cli::parse_from([
            "workspace-settings-cli",
            "show",
            "--workspace",
            "42",
            "--user",
            "7",
            "--requester",
            "7",
            "--role",
            "SENDER",
            "--role",
            "RECIPIENT",
        ]);
        let Some(Commands::Show(args)) = cli.command else {
            panic!("expected show command");
        };
        let requester = args.requester.to_requester();
        assert_eq!(requester.user_id(), UserId(7));
        assert!(!requester.is_root());
        assert!(requester.has_role(FunctionalRole::Recipient));
        assert!(!requester.has_role(FunctionalRole::SenderRestricted));
    }
}
