use crate::agent::replay::replay_file;
use crate::config::Config;
use crate::responses::error_response;
use crate::router::{handle, App};
use crate::search::SearchClient;
use astra::Server;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod agent;
mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod search;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(name = "property-finder", version, about = "Real-estate search assistant host")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the search page and the agent render endpoint (default).
    Serve,
    /// Replay a JSON-lines agent event log and print what the session shows.
    Replay {
        path: PathBuf,
        /// Agent to watch. Defaults to PROPERTY_AGENT_NAME.
        #[arg(long)]
        agent: Option<String>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config),
        Command::Replay { path, agent } => {
            let agent = agent.unwrap_or(config.agent_name);
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = replay_file(&path, &agent, &mut stdout) {
                tracing::error!(error = %e, "replay failed");
                std::process::exit(1);
            }
        }
    }
}

fn serve(config: Config) {
    let search = match SearchClient::new(config.search_url.clone(), config.search_timeout) {
        Ok(search) => search,
        Err(e) => {
            tracing::error!(error = %e, "search client init failed");
            std::process::exit(1);
        }
    };
    let app = App { search };

    tracing::info!(
        addr = %config.addr,
        search_url = %config.search_url,
        "starting server"
    );

    let server = Server::bind(&config.addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(error = %err, "request failed");
            error_response(&err)
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
