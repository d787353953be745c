mod firstfollow;
mod loader;
mod symboltable;

use crate::errors::Result;
use std::collections::HashMap;
use symboltable::SymbolTable;

pub use firstfollow::{
    Builder as FirstFollowBuilder, FirstItem, FirstSet, FirstVector, FollowMap, FollowSet,
};
pub use symboltable::{END_MARKER, EPSILON};

/// A context-free grammar symbol
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub enum Symbol {
    NonTerminal(usize),
    Terminal(usize),
    Empty,
}

/// A context-free grammar production
#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    pub head: usize,
    pub body: Vec<Symbol>,
}

impl Production {
    /// Returns true if this is an ε-production, that is, its body is empty
    /// or consists of the single symbol ε
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty() || self.body == [Symbol::Empty]
    }

    /// Returns the effective length of the production body. An ε-production
    /// has length zero, so the dot of a fresh item is already at the right.
    pub fn rhs_len(&self) -> usize {
        if self.is_epsilon() {
            0
        } else {
            self.body.len()
        }
    }
}

/// An augmented context-free grammar. The grammar is built once from its
/// textual representation and is immutable afterwards; the production at
/// index 0 is always the augmented production S' -> S.
pub struct Grammar {
    symbol_table: SymbolTable,
    symbols: Vec<Symbol>,
    productions: Vec<Production>,
    nt_productions: HashMap<usize, Vec<usize>>,
    start: usize,
    augmented_start: usize,
    eof: usize,
}

impl Grammar {
    /// Creates a grammar from a string representation
    pub fn new(input: &str) -> Result<Grammar> {
        let lines: Vec<&str> = input.lines().collect();
        Grammar::from_lines(&lines)
    }

    /// Creates a grammar from a sequence of text lines
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Grammar> {
        let output = loader::load(lines)?;

        // Build the ID-indexed symbol kind view used for dot scanning and
        // table iteration
        let symbols: Vec<Symbol> = output
            .symbol_table
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, s)| match s {
                symboltable::Symbol::Terminal(_) => Symbol::Terminal(i),
                symboltable::Symbol::NonTerminal(_) => Symbol::NonTerminal(i),
            })
            .collect();

        let mut nt_productions: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, p) in output.productions.iter().enumerate() {
            nt_productions.entry(p.head).or_default().push(i);
        }

        Ok(Grammar {
            symbol_table: output.symbol_table,
            symbols,
            productions: output.productions,
            nt_productions,
            start: output.start,
            augmented_start: output.augmented_start,
            eof: output.eof,
        })
    }

    /// Creates a grammar from a string representation in a file with the
    /// given path
    pub fn new_from_file(path: &str) -> std::result::Result<Grammar, Box<dyn std::error::Error>> {
        Ok(Grammar::new(&std::fs::read_to_string(path)?)?)
    }

    /// Returns the ID of the augmented start symbol S'
    pub fn augmented_start(&self) -> usize {
        self.augmented_start
    }

    /// Returns the ID of the end-of-input marker #
    pub fn eof_index(&self) -> usize {
        self.eof
    }

    /// Renders a production as `A -> X Y Z ` with a trailing space after
    /// every symbol. An ε body renders as `ε `.
    pub fn format_production(&self, p: usize) -> String {
        let production = &self.productions[p];
        let mut s = format!("{} -> ", self.value(production.head));
        for symbol in &production.body {
            match symbol {
                Symbol::Terminal(i) | Symbol::NonTerminal(i) => {
                    s.push_str(self.value(*i));
                }
                Symbol::Empty => {
                    s.push_str(EPSILON);
                }
            }
            s.push(' ');
        }
        s
    }

    /// Renders an LR(0) item as `A -> α . β ` with the dot between symbols,
    /// or as a terminating `.` when the dot is at the right. Items of
    /// ε-productions render as `A -> .`.
    pub fn format_item(&self, p: usize, dot: usize) -> String {
        let production = &self.productions[p];
        let mut s = format!("{} -> ", self.value(production.head));

        if production.is_epsilon() {
            s.push('.');
            return s;
        }

        for (pos, symbol) in production.body.iter().enumerate() {
            if pos == dot {
                s.push_str(". ");
            }
            match symbol {
                Symbol::Terminal(i) | Symbol::NonTerminal(i) => {
                    s.push_str(self.value(*i));
                }
                Symbol::Empty => {
                    s.push_str(EPSILON);
                }
            }
            s.push(' ');
        }
        if dot == production.body.len() {
            s.push('.');
        }
        s
    }

    /// Returns the ID of the non-terminal with the given name, if present
    pub fn maybe_non_terminal_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.maybe_non_terminal_index(name)
    }

    /// Returns the ID of the terminal with the given name, if present
    pub fn maybe_terminal_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.maybe_terminal_index(name)
    }

    /// Returns a sorted slice of the IDs of all non-terminals
    pub fn non_terminal_ids(&self) -> &[usize] {
        self.symbol_table.non_terminal_ids()
    }

    /// Returns the number of productions in the grammar, including the
    /// augmented production
    pub fn num_productions(&self) -> usize {
        self.productions.len()
    }

    /// Returns the production with the given index
    pub fn production(&self, i: usize) -> &Production {
        &self.productions[i]
    }

    /// Returns a sorted slice of indices of all productions for the given
    /// non-terminal. A non-terminal without productions yields an empty
    /// slice.
    pub fn productions_for_non_terminal(&self, i: usize) -> &[usize] {
        self.nt_productions
            .get(&i)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the ID of the original start symbol S
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns a slice of all grammar symbols, indexed by ID. ε is not a
    /// grammar symbol and never appears here.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns a sorted slice of the IDs of all terminals, always including
    /// the end-of-input marker
    pub fn terminal_ids(&self) -> &[usize] {
        self.symbol_table.terminal_ids()
    }

    /// Returns the name of the symbol with the given ID
    pub fn value(&self, i: usize) -> &str {
        self.symbol_table.value(i)
    }
}
