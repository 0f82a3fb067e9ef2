use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{compare::CompareArgs, generate::GenerateArgs, solve::SolveArgs};

mod compare;
mod generate;
mod parsers;
mod progress;
mod solve;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace a distance matrix by its all-pairs closure
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Compare two matrices cell by cell (exit code 0 if equal, 1 if not, 2 on error)
    Compare {
        #[command(flatten)]
        args: CompareArgs,
    },
    /// Generate a random graph as a distance matrix
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

fn main() -> Result<ExitCode, anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve { args } => solve::run(args.try_into()?)?,
        Commands::Compare { args } => return Ok(compare::run(args)),
        Commands::Generate { args } => generate::run(args)?,
    }

    Ok(ExitCode::SUCCESS)
}
