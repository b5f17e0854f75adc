use clap::{Parser, Subcommand};

mod cmd;

#[derive(Debug, Parser)]
#[clap(name = "sports-hub", about = "Sports scores, news and stats backend")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the API server and the admin console
    Server(sports_hub_api::config::Config),
    /// Maintenance commands
    Admin(cmd::admin::AdminArgs),
}

#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Server(config) => cmd::server::run(config).await?,
        Commands::Admin(args) => cmd::admin::admin_commands(args)?,
    }

    Ok(())
}
