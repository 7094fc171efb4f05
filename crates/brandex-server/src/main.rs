//! brandex-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered with
//! `BRANDEX_*` environment variables, opens the SQLite store, and serves the
//! API over HTTP.
//!
//! Run with `--hash-password` to turn a password typed on stdin into the
//! value for `admin_password_hash`.

use std::{
  io::{self, BufRead as _, Write as _},
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use brandex_server::{AppState, ServerConfig, auth};
use brandex_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Brandex brand directory server")]
struct Cli {
  /// Path to the TOML configuration file. Missing is fine when every
  /// setting comes from the environment.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  if cli.hash_password {
    return print_password_hash();
  }

  let config = load_config(&cli.config)?;
  serve(config).await
}

fn print_password_hash() -> anyhow::Result<()> {
  print!("Password: ");
  io::stdout().flush()?;

  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\n', '\r']);

  let hash = auth::hash_password(password).map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
  println!("{hash}");
  Ok(())
}

/// The config file, if present, overlaid with `BRANDEX_*` variables.
/// `BRANDEX_PUBLIC_ROUTES` is a comma-separated list.
fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let mut settings: ServerConfig = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("BRANDEX")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("public_routes"),
    )
    .build()
    .and_then(config::Config::try_deserialize)
    .with_context(|| format!("invalid configuration (file: {})", path.display()))?;

  settings.store_path = expand_home(&settings.store_path);
  Ok(settings)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
  let store = SqliteStore::open(&config.store_path)
    .await
    .with_context(|| format!("cannot open store at {}", config.store_path.display()))?;
  tracing::info!(
    store = %config.store_path.display(),
    public_routes = config.public_routes.len(),
    "store opened"
  );

  let address = format!("{}:{}", config.host, config.port);
  let app = brandex_server::router(AppState::new(store, &config));
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("cannot bind {address}"))?;

  tracing::info!(%address, "serving");
  axum::serve(listener, app).await.context("server error")
}

/// `~/x` becomes `$HOME/x`; other paths are returned as given.
fn expand_home(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
