use super::items::{Collection, Item, ItemSet};
use crate::errors::{Error, Result};
use crate::grammar::{FirstFollowBuilder, FirstVector, FollowMap, Grammar, Symbol};
use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// The table construction mode
pub enum Mode {
    Lr0,
    Slr1,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// An entry in an LR parse table
pub enum TableEntry {
    Goto(usize),
    Shift(usize),
    Reduce(usize),
    Accept,
    Error,
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableEntry::Goto(n) => write!(f, "goto {}", n),
            TableEntry::Shift(n) => write!(f, "s{}", n),
            TableEntry::Reduce(p) => write!(f, "r{}", p),
            TableEntry::Accept => write!(f, "acc"),
            TableEntry::Error => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A non-fatal conflict diagnostic recorded while building an LR(0) table.
/// The replacement entry is the one left in the table.
pub struct Conflict {
    pub state: usize,
    pub symbol: String,
    pub existing: TableEntry,
    pub replacement: TableEntry,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LR(0) conflict in state {} on '{}': {} vs {}",
            self.state, self.symbol, self.existing, self.replacement
        )
    }
}

/// An LR parse table: ACTION entries for terminals and GOTO entries for
/// non-terminals share one dense state-by-symbol table, since the two ID
/// sets are disjoint. The FIRST/FOLLOW sets and the canonical collection
/// the table was derived from are kept alongside it, and the whole value is
/// replaced when a table is rebuilt.
pub struct ParseTable {
    mode: Mode,
    actions: Vec<Vec<TableEntry>>,
    sets: Vec<ItemSet>,
    firsts: FirstVector,
    follows: FollowMap,
    conflicts: Vec<Conflict>,
}

impl ParseTable {
    /// Builds a parse table for the given augmented grammar. Both modes
    /// share the shift/GOTO phase and differ in the reduce phase: LR(0)
    /// reduces on every terminal with a last-write-wins conflict policy,
    /// SLR(1) reduces on FOLLOW of the production head and treats
    /// reduce/reduce and accept/reduce collisions as fatal.
    pub fn new(g: &Grammar, mode: Mode) -> Result<ParseTable> {
        let ff = FirstFollowBuilder::new(g);
        let collection = Collection::new(g);

        let mut actions: Vec<Vec<TableEntry>> =
            vec![vec![TableEntry::Error; g.symbols().len()]; collection.sets.len()];

        // Shift and GOTO entries come straight from the transitions
        // discovered while building the canonical collection
        for (from, row) in collection.transitions.iter().enumerate() {
            for (symbol, to) in row.iter().enumerate() {
                if let Some(to) = to {
                    actions[from][symbol] = match g.symbols()[symbol] {
                        Symbol::Terminal(_) => TableEntry::Shift(*to),
                        Symbol::NonTerminal(_) => TableEntry::Goto(*to),
                        Symbol::Empty => {
                            panic!("ε found in grammar symbols");
                        }
                    };
                }
            }
        }

        let mut table = ParseTable {
            mode,
            actions,
            sets: collection.sets,
            firsts: ff.firsts,
            follows: ff.follows,
            conflicts: Vec::new(),
        };

        // Reduce and accept entries, in sorted item order per state so the
        // result is identical on every run
        for state in 0..table.sets.len() {
            let mut items: Vec<Item> = table.sets[state].iter().cloned().collect();
            items.sort();

            for item in items {
                if !item.is_end(g) {
                    continue;
                }
                match mode {
                    Mode::Lr0 => table.add_reductions_lr0(g, state, &item),
                    Mode::Slr1 => table.add_reductions_slr1(g, state, &item)?,
                }
            }
        }

        tracing::debug!(
            states = table.sets.len(),
            conflicts = table.conflicts.len(),
            "built {:?} parse table",
            mode
        );

        Ok(table)
    }

    /// Returns the table entry for the given state and symbol
    pub fn action(&self, state: usize, symbol: usize) -> TableEntry {
        self.actions[state][symbol]
    }

    /// Returns the conflict diagnostics recorded during construction.
    /// Always empty for SLR(1) tables, whose conflicts are either resolved
    /// silently or fatal.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Returns the FIRST sets the table was built with, indexed by symbol
    pub fn firsts(&self) -> &FirstVector {
        &self.firsts
    }

    /// Returns the FOLLOW sets the table was built with
    pub fn follows(&self) -> &FollowMap {
        &self.follows
    }

    /// Returns the construction mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of states
    pub fn num_states(&self) -> usize {
        self.sets.len()
    }

    /// Returns the canonical collection the table was derived from
    pub fn sets(&self) -> &[ItemSet] {
        &self.sets
    }

    /// Adds LR(0) reductions for a reduce item: the augmented production
    /// accepts on the end-of-input marker, every other production reduces
    /// on every terminal. An occupied entry is recorded as a conflict and
    /// overwritten; the LR(0) table is informational and construction never
    /// fails.
    fn add_reductions_lr0(&mut self, g: &Grammar, state: usize, item: &Item) {
        if item.production == 0 {
            self.actions[state][g.eof_index()] = TableEntry::Accept;
            return;
        }

        let replacement = TableEntry::Reduce(item.production);
        for t in g.terminal_ids() {
            let existing = self.actions[state][*t];
            if existing != TableEntry::Error {
                let conflict = Conflict {
                    state,
                    symbol: g.value(*t).to_string(),
                    existing,
                    replacement,
                };
                tracing::warn!("{}", conflict);
                self.conflicts.push(conflict);
            }
            self.actions[state][*t] = replacement;
        }
    }

    /// Adds SLR(1) reductions for a reduce item, keyed by FOLLOW of the
    /// production head. Shift/reduce collisions keep the shift; the other
    /// collisions abort the build.
    fn add_reductions_slr1(&mut self, g: &Grammar, state: usize, item: &Item) -> Result<()> {
        if item.production == 0 {
            let eof = g.eof_index();
            if let TableEntry::Reduce(r) = self.actions[state][eof] {
                return Err(Error::AcceptReduceConflict {
                    state,
                    symbol: g.value(eof).to_string(),
                    production: r,
                });
            }
            self.actions[state][eof] = TableEntry::Accept;
            return Ok(());
        }

        let head = g.production(item.production).head;
        let mut lookaheads: Vec<usize> = self.follows[&head].iter().cloned().collect();
        lookaheads.sort_unstable();

        for t in lookaheads {
            match self.actions[state][t] {
                // Shift/reduce resolves silently in favor of the shift
                TableEntry::Shift(_) => continue,
                TableEntry::Reduce(r) if r != item.production => {
                    return Err(Error::ReduceReduceConflict {
                        state,
                        symbol: g.value(t).to_string(),
                        first: r,
                        second: item.production,
                    });
                }
                TableEntry::Reduce(_) => (),
                TableEntry::Accept => {
                    return Err(Error::AcceptReduceConflict {
                        state,
                        symbol: g.value(t).to_string(),
                        production: item.production,
                    });
                }
                // GOTO is for non-terminals, reductions are keyed by
                // terminals
                TableEntry::Goto(_) => {
                    panic!("GOTO found in actions");
                }
                TableEntry::Error => {
                    self.actions[state][t] = TableEntry::Reduce(item.production);
                }
            }
        }

        Ok(())
    }
}
