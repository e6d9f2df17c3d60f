use clap::{Parser, Subcommand};

use crate::logging::LoggingArgs;

mod cart;
mod menu;
mod source;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Restaurant menu and cart client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a restaurant menu
    Menu(menu::MenuArgs),

    /// Build a cart from menu items and print it
    Cart(cart::CartArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Menu(args) => menu::run(args).await,
            Commands::Cart(args) => cart::run(args).await,
        }
    }
}
