//! snmp-switch: serve an emulated network switch over SNMP.

use clap::Parser;
use snmp_switch::Result;
use snmp_switch::agent::Agent;
use snmp_switch::cli::args::Args;
use snmp_switch::cli::config::DeviceConfig;
use snmp_switch::switch::DEFAULT_NAME;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    args.init_tracing();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.device {
        Some(path) => DeviceConfig::load(path)?,
        None => DeviceConfig::default(),
    };

    let name = args
        .name
        .clone()
        .or_else(|| config.name.clone())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let agent = Agent::builder()
        .bind(args.bind)
        .port(args.port)
        .community(args.community)
        .name(name.as_str())
        .store(config.into_store(&name))
        .build()
        .await?;

    let cancel = agent.cancel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    agent.run().await
}
