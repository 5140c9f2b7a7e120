mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("osr_cli=warn,osr_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let decoder = commands::build_decoder(args.beatmaps.as_deref(), args.strict)?;

    match args.command {
        Command::Info { file, json } => commands::info::run(&decoder, &file, json),
        Command::Frames { file, limit } => commands::frames::run(&decoder, &file, limit),
        Command::Reencode {
            input,
            output,
            edited,
        } => commands::reencode::run(&decoder, &input, &output, edited),
        Command::Overlay { file } => commands::overlay::run(&decoder, &file),
    }
}
