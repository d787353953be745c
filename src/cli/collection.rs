use crate::grammar::Grammar;
use crate::parsers::items::{Collection, Item};

/// Outputs the canonical collection of LR(0) item sets
pub fn output(g: &Grammar) {
    let collection = Collection::new(g);
    let count = collection.sets.len();

    for (i, set) in collection.sets.into_iter().enumerate() {
        let mut items: Vec<Item> = set.into_iter().collect();
        items.sort();

        println!("I{}:", i);
        for item in items {
            println!("[{}]", g.format_item(item.production, item.dot).trim_end());
        }

        if i != count - 1 {
            println!();
        }
    }
}
