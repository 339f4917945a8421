mod logging;
mod program;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "bskyconnect")]
#[command(about = "Automated Bluesky connection management")]
struct Cli {
    /// Bluesky account handle; `connect` draws candidates from its followers
    #[arg(long)]
    account: Option<String>,

    /// Which maintenance program to run
    #[arg(long, value_enum)]
    program: Option<Program>,

    /// Maximum number of follow/unfollow actions (required for `connect`)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Program {
    /// Follow back active followers, unfollow inactive ones
    Followers,
    /// Prune accounts we follow
    Follows,
    /// `followers`, then `follows`
    Both,
    /// Follow active followers of `--account`, up to `--limit`
    Connect,
}

/// Validated command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub account: String,
    pub program: Program,
    pub limit: Option<u32>,
}

fn validate(cli: Cli) -> anyhow::Result<Invocation> {
    let (Some(account), Some(program)) = (cli.account, cli.program) else {
        anyhow::bail!("please pass both an account username and a program type");
    };
    let account = bskyconnect_core::normalize_handle(&account)?;
    if program == Program::Connect && cli.limit.is_none() {
        anyhow::bail!("the connect program requires --limit");
    }
    Ok(Invocation {
        account,
        program,
        limit: cli.limit,
    })
}

/// Parses and validates `args`. Clap's own errors come back as
/// [`clap::Error`] inside the `anyhow::Error` so help output can still be
/// told apart from a usage mistake.
fn parse_invocation<I, T>(args: I) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    validate(cli)
}

/// `--help` and `--version` surface as clap errors but are not failures.
fn informational(err: &anyhow::Error) -> Option<&clap::Error> {
    err.downcast_ref::<clap::Error>().filter(|e| {
        matches!(
            e.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        )
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let parsed = parse_invocation(std::env::args_os());
    if let Some(help) = parsed.as_ref().err().and_then(informational) {
        help.exit();
    }

    let log = bskyconnect_core::load_log_settings();
    if let Err(e) = logging::init(&log.path, &log.level) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    let invocation = match parsed {
        Ok(invocation) => invocation,
        Err(e) => {
            tracing::error!(event = "ARGUMENTS", "{}", e.to_string().trim_end());
            return ExitCode::FAILURE;
        }
    };

    let config = match bskyconnect_core::load_app_config_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(event = "FAILED", "configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config, &invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(event = "FAILED", "{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &bskyconnect_core::AppConfig, invocation: &Invocation) -> anyhow::Result<()> {
    let policy = match &config.policy_path {
        Some(path) => bskyconnect_core::load_policy(path)
            .with_context(|| format!("loading policy thresholds from {}", path.display()))?,
        None => bskyconnect_core::PolicyConfig::default(),
    };
    tracing::debug!(?config, ?policy, "configuration loaded");

    let client = bskyconnect_client::BlueskyClient::login(
        &config.service_url,
        &config.identifier,
        &config.app_password,
        config.request_timeout_secs,
    )
    .await
    .context("logging in to Bluesky")?;

    program::run_program(
        &client,
        &client.session().handle,
        Duration::from_millis(config.action_delay_ms),
        &policy,
        invocation,
    )
    .await
}
