//! posts-smoke - smoke checks for a JSON blog-post REST collection
//!
//! Runs list, get, create, replace, partial-update and delete checks
//! against `/posts` and stops at the first failure.

use clap::Parser;
use posts_smoke::commands::{Commands, GlobalArgs};
use posts_smoke::{cli, common::logging};

#[derive(Parser)]
#[command(name = "posts-smoke", about = "Smoke checks for a blog-post REST collection")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.global.verbose);

    let command = cli.command.unwrap_or(Commands::Run);

    match cli::dispatch(command, &cli.global).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {e}", e.kind());
            std::process::exit(1);
        }
    }
}
