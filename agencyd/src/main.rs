use clap::{Parser, Subcommand};
use rst_common::with_tokio::tokio;

use prople_agencyd::errors::AgencydError;
use prople_agencyd::svc::app::App;

#[derive(Parser)]
#[command(name = "agencyd")]
#[command(version = "0.1")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "serve")]
    #[command(about = "Running the agent and its web server")]
    Serve {
        /// Without a config file, the agent is configured from the environment only
        #[arg(short, long, value_name = "FILE")]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), AgencydError> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve { config } => {
            let app = App::new(config.to_owned());
            app.serve().await?;
        }
    }

    Ok(())
}
