use crate::grammar::{FirstFollowBuilder, Grammar, END_MARKER};

/// Outputs FOLLOW(A) for every non-terminal except the augmented start
/// symbol
pub fn output(g: &Grammar) {
    let builder = FirstFollowBuilder::new(g);

    for id in g.non_terminal_ids() {
        if *id == g.augmented_start() {
            continue;
        }

        // Sort names so that the end-of-input marker appears last
        let mut names: Vec<&str> = Vec::new();
        let mut has_end = false;
        for t in builder.follow(*id) {
            if *t == g.eof_index() {
                has_end = true;
            } else {
                names.push(g.value(*t));
            }
        }
        names.sort_unstable();
        if has_end {
            names.push(END_MARKER);
        }

        println!("FOLLOW({}) = {{ {} }}", g.value(*id), names.join(", "));
    }
}
