use clap::Parser;
use stacks_app::Cli;
use stacks_logging::stacks_debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    stacks_logging::initialize(cli.log_destination(), cli.log_level());

    if let Err(err) = stacks_app::run(cli).await {
        stacks_debug!("export failed: {err:?}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
