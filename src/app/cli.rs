use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Load and validate utility-class generator configuration"
)]
pub struct Cli {
    /// Declaration file to load (defaults to ./tailwind.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration as TOML
    #[arg(long)]
    pub print: bool,

    /// Paths to test against the content patterns (e.g., 'src/main.rs')
    #[arg(long, num_args = 1..)]
    pub check: Option<Vec<PathBuf>>,
}
