//! tma CLI: render a location, run a navigation REPL, list routes, print launch keyboards.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tma")]
#[command(about = "Telegram Mini App host: render, repl, routes, keyboard", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mount the app at LOCATION and print the rendered view.
    Render {
        location: String,
        /// Overrides BASE_URL.
        #[arg(long)]
        base_url: Option<String>,
        /// Raw tgWebAppData; overrides TG_INIT_DATA.
        #[arg(long)]
        init_data: Option<String>,
    },
    /// Mount at `/` and read locations from stdin (`back`, `forward`, `submit D M Y`, `quit`).
    Repl {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        init_data: Option<String>,
    },
    /// Print the route table.
    Routes,
    /// Print the bot's start keyboard as JSON (needs WEBAPP_URL).
    Keyboard {
        /// Adds a "view profile" button for this user id.
        #[arg(short, long)]
        profile: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
    },
}
