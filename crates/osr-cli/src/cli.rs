//! CLI argument definitions for osr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "osr")]
#[command(about = "Inspect and convert legacy replay files", version)]
pub struct Args {
    /// Beatmap index (JSON array) used to resolve beatmaps by hash
    #[arg(long, value_name = "FILE", env = "OSR_BEATMAPS")]
    pub beatmaps: Option<PathBuf>,

    /// Fail on damaged replay data instead of dropping it
    #[arg(long, env = "OSR_STRICT")]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the score stored in a replay file
    Info {
        /// Replay file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print replay frames as TSV
    Frames {
        /// Replay file
        file: PathBuf,
        /// Maximum number of frames to print
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Decode a replay file and write it back out
    Reencode {
        /// Input replay file
        input: PathBuf,
        /// Output replay file
        output: PathBuf,
        /// Mark the username as edited
        #[arg(long)]
        edited: bool,
    },
    /// Print the score-info overlay a replay would carry
    Overlay {
        /// Replay file
        file: PathBuf,
    },
}
