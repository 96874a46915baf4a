mod cli;
mod loaders;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    wxvane_core::init()?;
    Cli::parse().run().await
}
