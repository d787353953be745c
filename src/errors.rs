use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// The loaded grammar is unusable (no start symbol, undeclared symbol)
    InvalidGrammar(String),
    /// Two distinct reductions apply in the same state on the same lookahead
    ReduceReduceConflict {
        state: usize,
        symbol: String,
        first: usize,
        second: usize,
    },
    /// A reduction and the accept action collide on the end-of-input marker
    AcceptReduceConflict {
        state: usize,
        symbol: String,
        production: usize,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidGrammar(s) => write!(f, "invalid grammar: {}", s),
            Error::ReduceReduceConflict {
                state,
                symbol,
                first,
                second,
            } => {
                write!(
                    f,
                    "reduce-reduce conflict between productions {} and {} \
                     in state {} on input symbol '{}'",
                    first, second, state, symbol
                )
            }
            Error::AcceptReduceConflict {
                state,
                symbol,
                production,
            } => {
                write!(
                    f,
                    "conflict between reduce of production {} and accept \
                     in state {} on input symbol '{}'",
                    production, state, symbol
                )
            }
        }
    }
}
