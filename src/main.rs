use clap::Parser as ClapParser;
use lrlab::cli::args::{Commands, Options};
use lrlab::cli::{collection, export, first, follow, parse, productions, symbols, table};
use lrlab::grammar::Grammar;
use lrlab::parsers::Mode;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Options::parse();
    let text = std::fs::read_to_string(&cli.grammar)?;

    match &cli.command {
        Commands::Symbols => {
            symbols::output(&Grammar::new(&text)?);
        }
        Commands::Productions => {
            productions::output(&Grammar::new(&text)?);
        }
        Commands::First => {
            first::output(&Grammar::new(&text)?);
        }
        Commands::Follow => {
            follow::output(&Grammar::new(&text)?);
        }
        Commands::Collection => {
            collection::output(&Grammar::new(&text)?);
        }
        Commands::Table { lr0 } => {
            table::output(&Grammar::new(&text)?, mode(*lr0))?;
        }
        Commands::Parse { input, lr0 } => {
            parse::output(&text, input, mode(*lr0))?;
        }
        Commands::Export { input, lr0 } => {
            export::output(&text, input.as_deref(), mode(*lr0))?;
        }
    }

    Ok(())
}

fn mode(lr0: bool) -> Mode {
    if lr0 {
        Mode::Lr0
    } else {
        Mode::Slr1
    }
}
