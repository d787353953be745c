use crate::grammar::{FirstFollowBuilder, FirstItem, Grammar, EPSILON};

/// Outputs FIRST(X) for every grammar symbol except the augmented start
/// symbol
pub fn output(g: &Grammar) {
    let builder = FirstFollowBuilder::new(g);

    let ids = g
        .non_terminal_ids()
        .iter()
        .chain(g.terminal_ids())
        .filter(|i| **i != g.augmented_start());

    for id in ids {
        // Sort names so that ε appears last
        let mut names: Vec<&str> = Vec::new();
        let mut has_empty = false;
        for item in &builder.firsts[*id] {
            match item {
                FirstItem::Terminal(t) => names.push(g.value(*t)),
                FirstItem::Empty => has_empty = true,
            }
        }
        names.sort_unstable();
        if has_empty {
            names.push(EPSILON);
        }

        println!("FIRST({}) = {{ {} }}", g.value(*id), names.join(", "));
    }
}
