use clap::{Args, Subcommand};
use shopcart_app::context::AppContext;

use super::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => {
            AppContext::migrate(&command.database.database_url)
                .await
                .map_err(|error| format!("failed to migrate database: {error}"))?;

            println!("migrations applied");

            Ok(())
        }
    }
}
