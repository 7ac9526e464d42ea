mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use clap::Parser;
use quickbook_agent::{AgentTester, BedrockAgentRuntime, InvokeRequest};
use quickbook_core::config::{Config, resolve_config_path};
use quickbook_core::http::default_client;
use quickbook_index::{AossDirectory, IndexBody, Provisioner, SigV4Signer};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = cli::exit_code_for(&err);
            err.print().ok();
            return ExitCode::from(code);
        }
    };

    init_subscriber();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    config.validate()?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    match cli.command {
        Command::Schema => write_schema(&mut std::io::stdout().lock()),
        Command::CreateIndex => create_index(&config).await,
        Command::Invoke {
            agent_id,
            alias_id,
            question,
            session_id,
        } => {
            let question = question.unwrap_or_else(|| config.agent.fallback_question.clone());
            let mut request = InvokeRequest::new(agent_id, alias_id, question);
            if let Some(id) = session_id.or_else(|| config.agent.session_id.clone()) {
                request = request.with_session_id(id);
            }
            invoke_agent(&config, request).await
        }
    }
}

fn write_schema<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&IndexBody::textbook())?;
    writeln!(out, "{body}")?;
    out.flush()?;
    Ok(())
}

async fn create_index(config: &Config) -> anyhow::Result<()> {
    let sdk_config = load_sdk_config(&config.aws.region).await;
    let signer = SigV4Signer::from_sdk_config(&sdk_config)?;
    let provisioner = Provisioner::new(
        AossDirectory::new(&sdk_config),
        signer,
        default_client(config.index.timeout()),
        &config.index.collection,
        &config.index.name,
    );

    let mut stdout = std::io::stdout();
    provisioner.run(&mut stdout).await.with_context(|| {
        format!(
            "failed to provision index '{}' in collection '{}'",
            config.index.name, config.index.collection
        )
    })?;
    Ok(())
}

async fn invoke_agent(config: &Config, request: InvokeRequest) -> anyhow::Result<()> {
    let sdk_config = load_sdk_config(&config.aws.region).await;
    let tester = AgentTester::new(BedrockAgentRuntime::new(&sdk_config));
    let mut stdout = std::io::stdout();
    tester.run(request, &mut stdout).await?;
    Ok(())
}

async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    // stdout carries the command output; diagnostics go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
