//! `esa-rules` entry point
//!
//! Lists ESA origin / redirect rules, or updates one of them. Results go to stdout,
//! logs go to stderr.

mod cli;
mod output;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use cli::{Args, Command};
use esa_rules_core::{CoreError, RuleService};
use esa_rules_provider::{EsaApi, EsaClient, ProviderError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(default_level: &str) {
    // RUST_LOG 优先，其次 --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

/// 用户侧错误（规则不存在、凭证无效等）只记 warn
fn is_expected(e: &anyhow::Error) -> bool {
    if let Some(core) = e.downcast_ref::<CoreError>() {
        return core.is_expected();
    }
    e.downcast_ref::<ProviderError>()
        .is_some_and(ProviderError::is_expected)
}

fn connect(args: &Args) -> anyhow::Result<Arc<dyn EsaApi>> {
    let client = EsaClient::new(&args.client_config())?;
    tracing::debug!("[{}] endpoint {}", client.id(), client.endpoint());
    Ok(Arc::new(client))
}

/// Run one command. `connect` is only called once an action needs the remote API.
async fn run<F, W>(args: &Args, connect: F, out: &mut W) -> anyhow::Result<()>
where
    F: FnOnce(&Args) -> anyhow::Result<Arc<dyn EsaApi>>,
    W: Write,
{
    let command = args.action();
    if command == Command::Usage {
        writeln!(out, "{}", output::USAGE_ERROR)?;
        writeln!(out, "{}", Args::command().render_help())?;
        return Ok(());
    }

    let service = RuleService::new(connect(args)?);
    let selector = args.selector();

    match command {
        Command::List => {
            let listing = service.list_rules(args.site_id).await;
            writeln!(out, "{}", output::render_listing(&listing))?;
        }
        Command::UpdateRedirectPort { port } => {
            let change = service
                .prepare_redirect_port(args.site_id, &selector, port)
                .await?;
            writeln!(out, "{}", output::render_redirect_plan(&change))?;
            let response = service.apply_redirect_port(args.site_id, &change).await?;
            writeln!(out, "{}", output::render_redirect_done(&response))?;
        }
        Command::UpdateOrigin(change) => {
            let update = service
                .update_origin_rule(args.site_id, &selector, change)
                .await?;
            writeln!(out, "{}", output::render_origin_done(&update))?;
        }
        Command::Usage => {}
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(&args, connect, &mut std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_expected(&e) {
                tracing::warn!("{e}");
            } else {
                tracing::error!("{e:#}");
            }
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
