use crate::grammar::Grammar;

/// Outputs the grammar's start symbols and its sorted symbol lists
pub fn output(g: &Grammar) {
    println!("Start symbol: {}", g.value(g.start()));
    println!("Augmented start symbol: {}", g.value(g.augmented_start()));

    println!("Non-terminals: {}", sorted_names(g, g.non_terminal_ids()));
    println!("Terminals: {}", sorted_names(g, g.terminal_ids()));
}

fn sorted_names(g: &Grammar, ids: &[usize]) -> String {
    let mut names: Vec<&str> = ids.iter().map(|i| g.value(*i)).collect();
    names.sort();
    names.join(", ")
}
