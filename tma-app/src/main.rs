//! `tma` binary: hosts the mini app headlessly.

use anyhow::Result;
use clap::Parser;
use tma_app::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run(cli).await
}
