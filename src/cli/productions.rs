use crate::grammar::Grammar;

/// Outputs an ordered list of the productions in the grammar, with their
/// indices
pub fn output(g: &Grammar) {
    let n_width = (g.num_productions().checked_ilog10().unwrap_or(0) + 1) as usize;

    for i in 0..g.num_productions() {
        println!("{:>n$}: {}", i, g.format_production(i).trim_end(), n = n_width);
    }
}
