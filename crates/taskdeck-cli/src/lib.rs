pub mod cli;
pub mod commands;
pub mod config;
pub mod dates;
pub mod render;
pub mod transport;

use std::ffi::OsString;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args)?;
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting taskdeck CLI"
    );
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::Config::load(cli.rc_file.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value))),
    );
    if let Some(url) = cli.url {
        cfg.apply_overrides([("api.url".to_string(), url)]);
    }

    let command = match cli.command {
        Some(command) => command,
        None => cli::Command::View {
            filter: Some(cfg.default_view()?),
        },
    };

    let transport = transport::HttpTransport::new(&cfg.api_url())?;
    info!(backend = %transport.origin(), "using task backend");

    let renderer = render::Renderer::new(&cfg)?;
    let mut session =
        commands::Session::new(transport, renderer, io::stdout().lock(), prompt_stdin);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(session.dispatch(command))?;

    info!("done");
    Ok(())
}

fn prompt_stdin(question: &str) -> anyhow::Result<bool> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
