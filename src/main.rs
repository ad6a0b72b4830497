use url_shortener::{config, server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    telemetry::init(&config)?;

    tracing::info!(env = config.env.as_str(), "starting url-shortener");
    config.print_summary();

    server::run(config).await
}
