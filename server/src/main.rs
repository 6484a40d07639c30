use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = shared::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let config = shared::Config::from_env()?;
    if let Err(e) = config.require_api_key() {
        error!("{}", e);
        error!("Set it in the environment or in a .env file next to the binary.");
        std::process::exit(1);
    }

    server::run(config).await
}
