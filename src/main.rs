//! freebot
//!
//! Names a movie file after its catalog entry.
//!
//! # Usage
//!
//! ```bash
//! freebot --input "Dune.2021.2160p.mkv" --mode test
//! freebot --input ~/downloads/dune --mode hardlink --output ~/library/movies
//! freebot -i movie.mkv -m move -o ~/library -t "{n} ({y})/{n} ({y}) [{res}]" --yes
//! ```

use anyhow::Result;
use clap::Parser;

use freebot::cli::{commands, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::identify(cli).await
}
