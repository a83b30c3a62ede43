use crate::commands::Commands;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "cr-cli")]
#[clap(about = "Look up player profiles, arenas and chest cycles", long_about = None)]
pub struct Cli {
    #[clap(
        long,
        global = true,
        value_parser,
        help = "Data directory (defaults to ~/.crprofile)"
    )]
    pub data_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
