use clap::Parser;

use explainthis::cli::{self, render, Cli};
use explainthis::core::logging;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    render::install_miette_hook();
    let _log_guard = logging::init(cli.log_output());
    log::info!("{} v{} starting", explainthis::NAME, explainthis::VERSION);

    cli::run(cli).await
}
