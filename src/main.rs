use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use sso_group_utils::config::{DEFAULT_CONFIG_PATH, SsoConf, get_log_target, set_log_target};
use sso_group_utils::{ChangeSet, SsoAdminClient, update_group};
use std::path::PathBuf;

const UPDATE_EXAMPLES: &str = "\
Examples:
  sso-group update -d \"Group description\" NAME
  sso-group update -a user1 NAME
  sso-group update -r user2 NAME
  sso-group update -g -a group1 NAME
  sso-group update -g -r group2 NAME";

#[derive(Parser)]
#[command(name = "sso-group")]
#[command(author, version, about = "SSO group administration", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the SSO config file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// SSO admin service URL (overrides config and SSO_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (overrides config and SSO_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update SSO group
    #[command(after_help = UPDATE_EXAMPLES)]
    Update(UpdateArgs),
}

#[derive(Args)]
struct UpdateArgs {
    /// Group to update
    name: String,

    /// Group description
    #[arg(short = 'd', long = "description", value_name = "TEXT")]
    description: Option<String>,

    /// Add user/group to group
    #[arg(short = 'a', long = "add", value_name = "NAME")]
    add: Option<String>,

    /// Remove user/group from group
    #[arg(short = 'r', long = "remove", value_name = "NAME")]
    remove: Option<String>,

    /// Add/Remove group from group
    #[arg(short = 'g', long = "group")]
    group: bool,
}

fn load_config(cli: &Cli) -> Result<SsoConf> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut conf = SsoConf::load(&path, cli.config.is_some())?;
    conf.apply_env();
    if let Some(url) = &cli.url {
        conf.base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        conf.token = token.clone();
    }
    conf.validate()?;
    Ok(conf)
}

/// `--verbose` only raises this crate's own logs; HTTP internals stay at info.
fn log_filter(verbose: bool) -> String {
    if verbose {
        format!("info,{}=debug", env!("CARGO_PKG_NAME"))
    } else {
        "info".to_string()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose)),
    )
    .init();
    set_log_target(env!("CARGO_PKG_NAME").to_string());

    let conf = load_config(&cli)?;
    let client = SsoAdminClient::new(&conf).context("Failed to create SSO client")?;

    match cli.command {
        Commands::Update(args) => {
            let changes = ChangeSet::new(args.description, args.add, args.remove, args.group);
            update_group(&client, &args.name, &changes).await?;
            info!(target:get_log_target(), "Group '{}' updated", args.name);
        }
    }

    Ok(())
}
