//! `untis` command-line entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: command-line flags (with environment fallbacks)
//!    are mapped onto [`untis::UntisConfig`] and [`jsonrpc::ClientConfig`].
//! 2. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter` (`RUST_LOG`, default `info`) and a text or JSON formatter.
//!    Logs go to stderr so stdout stays machine-readable.
//! 3. **Run one command**:
//!    - `schools <query>`: search the discovery directory.
//!    - `teachers` / `subjects`: log in to a school, run the query, log out.
//!
//! Results are printed to stdout as pretty JSON.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use jsonrpc::ClientConfig;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use untis::{search_schools, School, Session, UntisConfig, DEFAULT_CLIENT_NAME, DEFAULT_DISCOVERY_URL};

#[derive(Parser, Debug)]
#[command(name = "untis")]
#[command(about = "Query a WebUntis server from the command line")]
struct Cli {
    /// School discovery endpoint
    #[arg(long, env = "UNTIS_DISCOVERY_URL", default_value = DEFAULT_DISCOVERY_URL)]
    discovery_url: String,

    /// Client name sent when logging in
    #[arg(long, env = "UNTIS_CLIENT_NAME", default_value = DEFAULT_CLIENT_NAME)]
    client_name: String,

    /// Request timeout in seconds (unset = HTTP stack default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Connect timeout in seconds (unset = HTTP stack default)
    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the directory for schools
    Schools {
        /// Name or part of a name to search for
        query: String,
    },
    /// List teachers (may need extra permissions)
    Teachers(LoginArgs),
    /// List subjects
    Subjects(LoginArgs),
}

#[derive(Args)]
struct LoginArgs {
    /// Server host of the school (e.g. s1.webuntis.com)
    #[arg(long)]
    server: String,

    /// Login name of the school
    #[arg(long)]
    school: String,

    /// User name
    #[arg(long, env = "UNTIS_USER")]
    user: String,

    /// Password
    #[arg(long, env = "UNTIS_PASSWORD", hide_env_values = true)]
    password: String,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("server", &self.server)
            .field("school", &self.school)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Cli {
    fn config(&self) -> UntisConfig {
        UntisConfig {
            discovery_url: self.discovery_url.clone(),
            client_name: self.client_name.clone(),
            transport: self.transport(),
        }
    }

    fn transport(&self) -> ClientConfig {
        let mut transport = ClientConfig::default();
        if let Some(secs) = self.timeout_secs {
            transport = transport.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout_secs {
            transport = transport.with_connect_timeout(Duration::from_secs(secs));
        }
        transport
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to format output")?;
    println!("{text}");
    Ok(())
}

async fn with_session(config: &UntisConfig, login: &LoginArgs, query: Query) -> Result<serde_json::Value> {
    let endpoint = School::endpoint(&login.server, &login.school);
    let mut session = Session::login(&endpoint, config, &login.user, &login.password)
        .await
        .with_context(|| format!("Login to {endpoint} failed"))?;

    let result = match query {
        Query::Teachers => session.teachers().await,
        Query::Subjects => session.subjects().await,
    };
    // Log out even if the query failed; the query error takes precedence.
    let logout = session.logout().await;

    let value = result?;
    logout.context("Logout failed")?;
    Ok(value)
}

#[derive(Clone, Copy, Debug)]
enum Query {
    Teachers,
    Subjects,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = cli.config();
    match &cli.command {
        Command::Schools { query } => {
            let schools = search_schools(&config, query).await?;
            info!(count = schools.len(), "Search finished");
            print_json(&schools)
        }
        Command::Teachers(login) => print_json(&with_session(&config, login, Query::Teachers).await?),
        Command::Subjects(login) => print_json(&with_session(&config, login, Query::Subjects).await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from([
            "untis",
            "--discovery-url",
            "http://localhost:8080/ms",
            "--timeout-secs",
            "15",
            "schools",
            "example",
        ]);
        let config = cli.config();

        assert_eq!(config.discovery_url, "http://localhost:8080/ms");
        assert_eq!(config.transport.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.transport.connect_timeout(), None);
        assert!(matches!(cli.command, Command::Schools { ref query } if query == "example"));
    }

    #[test]
    fn login_flags_are_parsed_for_queries() {
        let cli = Cli::parse_from([
            "untis",
            "subjects",
            "--server",
            "s1.webuntis.com",
            "--school",
            "example",
            "--user",
            "alice",
            "--password",
            "secret",
        ]);

        match cli.command {
            Command::Subjects(login) => {
                assert_eq!(login.server, "s1.webuntis.com");
                assert_eq!(login.school, "example");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn debug_output_hides_the_password() {
        let cli = Cli::parse_from([
            "untis",
            "teachers",
            "--server",
            "s1.webuntis.com",
            "--school",
            "example",
            "--user",
            "alice",
            "--password",
            "hunter2-secret",
        ]);

        let printed = format!("{cli:?}");
        assert!(!printed.contains("hunter2-secret"), "{printed}");
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("alice"));
    }
}
