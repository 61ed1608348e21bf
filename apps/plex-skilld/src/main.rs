use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::Read;
use std::net::SocketAddr;
use tracing::{info, warn};

use plex_skill::{
    create_dispatcher, handle_intent, handle_request, BackendKind, SkillConfig, SkillRequest, Slots,
};

mod routes;

#[derive(Parser, Debug)]
#[command(
    name = "plex-skilld",
    version,
    about = "Voice skill endpoint for a Plex control server",
    disable_help_subcommand = true
)]
struct Cli {
    /// Control server base URL
    #[arg(long, env = "CONTROL_SERVER_URL", global = true)]
    control_server_url: Option<String>,

    /// API key sent with every control server request
    #[arg(long, env = "API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Answer from the built-in mock control server instead of HTTP
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the skill endpoint over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },
    /// Dispatch one intent and print the spoken reply
    Invoke {
        /// Platform intent name, e.g. MovieIntent or AMAZON.PauseIntent
        intent: String,
        /// Slot value as NAME=VALUE (repeatable)
        #[arg(long = "slot", value_parser = parse_slot)]
        slots: Vec<(String, String)>,
    },
    /// Process one platform request JSON (file or stdin) and print the response
    Event {
        /// Request file; reads stdin when omitted
        path: Option<String>,
    },
}

fn parse_slot(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", raw))?;
    if name.is_empty() {
        return Err(format!("empty slot name in {:?}", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let backend = if cli.mock {
        warn!("using mock control server");
        BackendKind::Mock
    } else {
        BackendKind::Http
    };
    let dispatcher =
        create_dispatcher(config, backend).context("creating intent dispatcher")?;

    match cli.command {
        Commands::Serve { bind } => {
            let app = routes::router(dispatcher);
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("binding {}", bind))?;
            info!("plex-skilld listening on {}", bind);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Invoke { intent, slots } => {
            let slots: Slots = slots.into_iter().collect();
            let turn = handle_intent(&dispatcher, &intent, &slots).await;
            if let Some(err) = &turn.failure {
                warn!("action failed: {}", err);
            }
            println!("{}", turn.reply.speech());
            if let Some(reprompt) = turn.reply.reprompt() {
                println!("(reprompt) {}", reprompt);
            }
        }
        Commands::Event { path } => {
            let raw = match path {
                Some(p) => std::fs::read(&p).with_context(|| format!("reading request: {}", p))?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin()
                        .read_to_end(&mut buf)
                        .context("reading request from stdin")?;
                    buf
                }
            };
            let request = SkillRequest::from_slice(&raw).context("parsing platform request")?;
            let response = handle_request(&dispatcher, &request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<SkillConfig> {
    let url = cli
        .control_server_url
        .as_deref()
        .context("control server URL is required (--control-server-url or CONTROL_SERVER_URL)")?;
    let key = cli
        .api_key
        .as_deref()
        .context("API key is required (--api-key or API_KEY)")?;
    Ok(SkillConfig::new(url, key)?)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
