mod cli;
mod compilation_pipeline;
mod exit;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    cli::run(cli);
}
