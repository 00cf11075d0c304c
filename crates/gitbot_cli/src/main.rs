use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use gitbot_cli::commands::{
    console_cmd::{self, ConsoleArgs},
    generate_cmd, rules_cmd,
    web_cmd::{self, WebArgs},
};
use gitbot_cli::config::log_directive;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// gitbot: label GitHub issues using regular expression rules
#[derive(Parser)]
#[command(name = "gitbot")]
#[command(about = "Label GitHub issues using regular expression rules", long_about = None)]
struct Cli {
    /// Much verbosity. May be repeated. More v's, more info
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Periodically label the issues of the given repositories
    Console(ConsoleArgs),

    /// Label issues as GitHub reports them through a webhook at /callback
    Web(WebArgs),

    /// Generate the config files necessary for the program to run
    Generate,

    /// Check a rules file and print the rules it defines
    Rules {
        /// Rules file to check
        file: PathBuf,
    },

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new(log_directive(cli.verbose)))
        .init();

    let result = match &cli.command {
        Commands::Console(args) => console_cmd::execute(args).await,
        Commands::Web(args) => web_cmd::execute(args).await,
        Commands::Generate => generate_cmd::execute(),
        Commands::Rules { file } => rules_cmd::execute(file).await,
        Commands::Version => {
            println!("gitbot version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
