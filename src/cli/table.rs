use crate::errors::Result;
use crate::grammar::Grammar;
use crate::parsers::{Mode, ParseTable, TableEntry};

/// Outputs the ACTION and GOTO tables, preceded by any conflict
/// diagnostics recorded during construction
pub fn output(g: &Grammar, mode: Mode) -> Result<()> {
    let table = ParseTable::new(g, mode)?;

    for conflict in table.conflicts() {
        println!("{}", conflict);
    }
    if !table.conflicts().is_empty() {
        println!();
    }

    for state in 0..table.num_states() {
        println!("State {}:", state);

        for id in g.terminal_ids() {
            let entry = table.action(state, *id);
            if entry != TableEntry::Error {
                println!("  ACTION[{}] = {}", g.value(*id), entry);
            }
        }
        for id in g.non_terminal_ids() {
            if let TableEntry::Goto(to) = table.action(state, *id) {
                println!("  GOTO[{}] = {}", g.value(*id), to);
            }
        }
    }

    Ok(())
}
