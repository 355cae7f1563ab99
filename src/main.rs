use anyhow::{Result, ensure};
use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::{debug, error, info};
use socket_remote::{
    Command, Endpoint, RemoteCommandSender, SendError, SettingsStore,
    cli::{Action, Cli},
    config::AppConfig,
};
use std::io::Write;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize();

    let config = AppConfig::load()?;
    let store = SettingsStore::from_config(config);

    match cli.action {
        Action::Send { command } => send(config, &store, command).await,
        Action::Configure { host, port } => {
            let endpoint = store.update(host.as_deref(), port.as_deref())?;
            println!("{endpoint}");
            Ok(())
        }
        Action::Show => {
            let endpoint = current_endpoint(config, &store)?;
            if endpoint.is_configured() {
                println!("{endpoint}");
            } else {
                println!("not configured");
            }
            Ok(())
        }
        Action::Reset => store.clear(),
        Action::Commands => {
            for command in Command::ALL {
                println!("{:<12} {}", command.path(), command.alias());
            }
            Ok(())
        }
    }
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    debug!("module version: {}", env!("CARGO_PKG_VERSION"));
}

/// Stored endpoint with environment overrides applied
fn current_endpoint(config: &AppConfig, store: &SettingsStore) -> Result<Endpoint> {
    let overrides = &config.endpoint_override;

    Ok(store
        .load()?
        .merged(overrides.host.as_deref(), overrides.port.as_deref()))
}

async fn send(config: &AppConfig, store: &SettingsStore, command: Command) -> Result<()> {
    let endpoint = current_endpoint(config, store)?;
    ensure!(
        endpoint.is_configured(),
        "{}: run `socket-remote configure --host <ip> --port <port>`",
        SendError::NotConfigured
    );

    let sender = RemoteCommandSender::http(&config.timeouts)?;
    let response = sender.send(command, &endpoint).await?;

    info!("{} answered: {}", response.url, response.body);
    Ok(())
}
