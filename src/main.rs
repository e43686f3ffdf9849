use eyre::{Context, Result};

/// Log filter used when `RUST_LOG` is not set. Logs go to stderr, stdout carries the envelope.
const DEFAULT_LOG_FILTER: &str = "house_router=info";

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` may provide `RUST_LOG`, so it is loaded before the logger
    let dotenv_result = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .try_init()
        .wrap_err("could not initialize logger")?;
    color_eyre::install().wrap_err("could not install error reporter")?;

    match dotenv_result {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => log::debug!("No .env file found"),
        Err(err) => log::warn!("Could not load .env file: {}", err),
    }

    house_router::cli().await
}
