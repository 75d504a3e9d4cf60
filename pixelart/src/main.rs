use clap::Parser;
use pixelart::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pixelart::init_logger();
    cli::run(Cli::parse()).await
}
