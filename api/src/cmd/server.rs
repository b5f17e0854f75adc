use sports_hub_api::tracing_config::{self, LogFormat};

pub async fn run(config: sports_hub_api::config::Config) -> Result<(), eyre::Report> {
    tracing_config::configure(
        "sports-hub",
        LogFormat::for_env(config.production()),
        std::io::stdout,
    )
    .map_err(|e| eyre::eyre!(e))?;

    let server = sports_hub_api::create_server(config)
        .await
        .map_err(|e| eyre::eyre!(e))?;
    server.run().await?;

    Ok(())
}
