//! Text-format grammar loader.
//!
//! The input is a sequence of lines using the section headers
//! `NonTerminals:`, `Terminals:`, `StartSymbol:` and `Productions:`.
//! Headers are recognized by case-sensitive substring match anywhere in the
//! line, so a production line containing a header keyword is treated as a
//! header. Symbol lists split on commas, production alternatives on `|`,
//! and right-hand-side symbols on spaces. The literal `ε` denotes an empty
//! right-hand side and `#` is reserved as the end-of-input terminal.

use super::symboltable::{SymbolTable, END_MARKER, EPSILON};
use super::{Production, Symbol};
use crate::errors::{Error, Result};

/// The loader's output: an interned symbol table, the augmented production
/// list, and the IDs of the distinguished symbols
pub struct LoaderOutput {
    pub symbol_table: SymbolTable,
    pub productions: Vec<Production>,
    pub start: usize,
    pub augmented_start: usize,
    pub eof: usize,
}

/// A production as read from the text, before symbol interning
struct RawProduction {
    left: String,
    right: Vec<String>,
}

/// Loads a grammar from its textual representation and augments it with
/// the production S' -> S at index 0
pub fn load<S: AsRef<str>>(lines: &[S]) -> Result<LoaderOutput> {
    let mut non_terminal_names: Vec<String> = Vec::new();
    let mut terminal_names: Vec<String> = Vec::new();
    let mut start_name = String::new();
    let mut raw_productions: Vec<RawProduction> = Vec::new();

    let mut in_productions = false;
    for line in lines {
        let line = line.as_ref();

        if line.contains("NonTerminals:") {
            non_terminal_names.extend(split_list(after_colon(line)));
        } else if line.contains("Terminals:") {
            terminal_names.extend(split_list(after_colon(line)));
        } else if line.contains("StartSymbol:") {
            if let Some(name) = after_colon(line).split_whitespace().next() {
                start_name = name.to_string();
            }
        } else if line.contains("Productions:") {
            in_productions = true;
        } else if in_productions && !line.is_empty() {
            parse_production_line(line, &mut raw_productions);
        }
    }

    if start_name.is_empty() {
        return Err(Error::InvalidGrammar("no start symbol".to_string()));
    }

    // Terminals and non-terminals must be disjoint for interning to give
    // each name a single classification
    for name in &terminal_names {
        if non_terminal_names.iter().any(|nt| nt == name) {
            return Err(Error::InvalidGrammar(format!(
                "symbol '{}' declared as both a terminal and a non-terminal",
                name
            )));
        }
    }

    let mut symbol_table = SymbolTable::new();
    for name in &non_terminal_names {
        if name != EPSILON {
            symbol_table.add_non_terminal(name);
        }
    }

    let start = symbol_table
        .maybe_non_terminal_index(&start_name)
        .ok_or_else(|| {
            Error::InvalidGrammar(format!(
                "start symbol '{}' is not a declared non-terminal",
                start_name
            ))
        })?;

    let augmented_name = format!("{}'", start_name);
    let augmented_start = symbol_table.add_non_terminal(&augmented_name);

    for name in &terminal_names {
        if name != EPSILON {
            symbol_table.add_terminal(name);
        }
    }
    let eof = symbol_table.add_terminal(END_MARKER);

    // Intern the production bodies, then prepend S' -> S so the augmented
    // production always has index 0
    let mut productions = vec![Production {
        head: augmented_start,
        body: vec![Symbol::NonTerminal(start)],
    }];
    for raw in &raw_productions {
        productions.push(intern_production(&symbol_table, raw)?);
    }

    Ok(LoaderOutput {
        symbol_table,
        productions,
        start,
        augmented_start,
        eof,
    })
}

/// Returns the part of the line after its first colon, or the empty string
/// if the line has no colon
fn after_colon(line: &str) -> &str {
    match line.find(':') {
        Some(i) => &line[i + 1..],
        None => "",
    }
}

/// Splits a comma-separated symbol list, trimming whitespace and dropping
/// empty entries
fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses a single production line `LHS -> α1 | α2 | ...` into one raw
/// production per alternative. Lines without an arrow are ignored.
fn parse_production_line(line: &str, out: &mut Vec<RawProduction>) {
    let Some(arrow) = line.find("->") else {
        return;
    };

    let left: String = line[..arrow].chars().filter(|c| !c.is_whitespace()).collect();
    let right_part = &line[arrow + 2..];

    for alternative in right_part.split('|') {
        let mut right: Vec<String> = Vec::new();
        for token in alternative.split_whitespace() {
            if token == EPSILON {
                // An ε alternative has no other symbols
                right = vec![EPSILON.to_string()];
                break;
            }
            right.push(token.to_string());
        }
        out.push(RawProduction {
            left: left.clone(),
            right,
        });
    }
}

/// Converts a raw production into an interned one, classifying every
/// right-hand-side symbol
fn intern_production(table: &SymbolTable, raw: &RawProduction) -> Result<Production> {
    let head = table.maybe_non_terminal_index(&raw.left).ok_or_else(|| {
        Error::InvalidGrammar(format!(
            "production head '{}' is not a declared non-terminal",
            raw.left
        ))
    })?;

    let mut body: Vec<Symbol> = Vec::new();
    for name in &raw.right {
        if name == EPSILON {
            body.push(Symbol::Empty);
        } else if let Some(i) = table.maybe_non_terminal_index(name) {
            body.push(Symbol::NonTerminal(i));
        } else if let Some(i) = table.maybe_terminal_index(name) {
            body.push(Symbol::Terminal(i));
        } else {
            return Err(Error::InvalidGrammar(format!(
                "symbol '{}' in production '{}' is not declared",
                name, raw.left
            )));
        }
    }

    Ok(Production { head, body })
}
