use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Command line options for the lrlab tool
pub struct Options {
    /// Path to the grammar description file
    pub grammar: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
/// Commands for the lrlab tool
pub enum Commands {
    /// Lists the grammar's symbols
    Symbols,
    /// Lists the grammar's productions with their indices
    Productions,
    /// Prints the FIRST set of every symbol
    First,
    /// Prints the FOLLOW set of every non-terminal
    Follow,
    /// Prints the canonical collection of LR(0) item sets
    Collection,
    /// Prints the ACTION and GOTO tables
    Table {
        /// Build the LR(0) table instead of the SLR(1) table
        #[arg(long)]
        lr0: bool,
    },
    /// Parses an input string and prints the step trace
    Parse {
        /// Whitespace-separated terminal tokens to parse
        #[arg(long)]
        input: String,

        /// Parse with the LR(0) table instead of the SLR(1) table
        #[arg(long)]
        lr0: bool,
    },
    /// Prints the full report as JSON
    Export {
        /// Optional input to parse before exporting
        #[arg(long)]
        input: Option<String>,

        /// Export the LR(0) artifacts instead of the SLR(1) ones
        #[arg(long)]
        lr0: bool,
    },
}
