use super::table::{ParseTable, TableEntry};
use crate::grammar::{Grammar, END_MARKER};
use serde::Serialize;

/// A snapshot of the driver's configuration at the start of one iteration,
/// with the action the driver took from it. Stacks render bottom to top
/// with a space after every entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseStep {
    pub step: usize,
    pub state_stack: String,
    pub symbol_stack: String,
    pub current_input: String,
    pub remaining_input: String,
    pub action: String,
}

/// The result of one driver invocation: the full step trace and whether the
/// input was accepted
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    pub steps: Vec<ParseStep>,
    pub accepted: bool,
}

/// Runs a shift/reduce parse of the given input over a parse table. The
/// input splits on ASCII whitespace into terminal tokens; once they are
/// exhausted the lookahead is the end-of-input marker. The driver stops at
/// the first missing table entry and records the failure as the final
/// trace step.
pub fn parse(g: &Grammar, table: &ParseTable, input: &str) -> Trace {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    let mut state_stack: Vec<usize> = vec![0];
    let mut symbol_stack: Vec<usize> = vec![g.eof_index()];
    let mut ptr = 0;
    let mut step = 1;
    let mut steps: Vec<ParseStep> = Vec::new();

    loop {
        let state = *state_stack.last().expect("state stack is never empty");
        let current = if ptr < tokens.len() {
            tokens[ptr]
        } else {
            END_MARKER
        };

        let mut ps = ParseStep {
            step,
            state_stack: render_states(&state_stack),
            symbol_stack: render_symbols(g, &symbol_stack),
            current_input: current.to_string(),
            remaining_input: tokens[ptr.min(tokens.len())..].join(" "),
            action: String::new(),
        };

        // A token that is not a known terminal has no ACTION entry
        let lookahead = if ptr < tokens.len() {
            g.maybe_terminal_index(tokens[ptr])
        } else {
            Some(g.eof_index())
        };
        let Some(lookahead) = lookahead else {
            ps.action = "Error: No ACTION entry".to_string();
            steps.push(ps);
            return Trace {
                steps,
                accepted: false,
            };
        };

        match table.action(state, lookahead) {
            TableEntry::Accept => {
                ps.action = "Accept".to_string();
                steps.push(ps);
                return Trace {
                    steps,
                    accepted: true,
                };
            }
            TableEntry::Shift(next) => {
                state_stack.push(next);
                symbol_stack.push(lookahead);
                ptr += 1;
                ps.action = format!("Shift to state {}", next);
            }
            TableEntry::Reduce(p) => {
                let production = g.production(p);

                // Pop the production body off both stacks; an ε-production
                // pops nothing. A table built over ignored conflicts can ask
                // to pop more than the stack holds, which leaves no state to
                // consult for the GOTO.
                let count = production.rhs_len();
                if count >= state_stack.len() {
                    ps.action = "Error: No GOTO entry".to_string();
                    steps.push(ps);
                    return Trace {
                        steps,
                        accepted: false,
                    };
                }
                state_stack.truncate(state_stack.len() - count);
                symbol_stack.truncate(symbol_stack.len() - count);

                let top = *state_stack.last().expect("state stack is never empty");
                match table.action(top, production.head) {
                    TableEntry::Goto(next) => {
                        state_stack.push(next);
                        symbol_stack.push(production.head);
                        ps.action = format!("Reduce: {}", g.format_production(p));
                    }
                    _ => {
                        ps.action = "Error: No GOTO entry".to_string();
                        steps.push(ps);
                        return Trace {
                            steps,
                            accepted: false,
                        };
                    }
                }
            }
            TableEntry::Error => {
                ps.action = "Error: No ACTION entry".to_string();
                steps.push(ps);
                return Trace {
                    steps,
                    accepted: false,
                };
            }
            TableEntry::Goto(_) => {
                // GOTO is for non-terminals, and the lookahead is always a
                // terminal
                panic!("GOTO found in actions");
            }
        }

        steps.push(ps);
        step += 1;
    }
}

/// Renders a state stack bottom to top
fn render_states(stack: &[usize]) -> String {
    stack.iter().map(|s| format!("{} ", s)).collect()
}

/// Renders a symbol stack bottom to top
fn render_symbols(g: &Grammar, stack: &[usize]) -> String {
    stack.iter().map(|s| format!("{} ", g.value(*s))).collect()
}
