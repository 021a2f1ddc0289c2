use clap::{Parser, Subcommand};

mod cart;
mod config;
mod db;
mod logging;

use config::LoggingConfig;

#[derive(Debug, Parser)]
#[command(name = "shopcart", about = "Shopping cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Cart(command) => cart::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
