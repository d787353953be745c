use crate::grammar::{Grammar, Symbol};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

pub type ItemSet = std::collections::HashSet<Item>;

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
/// An LR(0) item: a production index and a dot position. For an
/// ε-production the body counts as empty, so the fresh item with the dot
/// at the left is already a reduce item.
pub struct Item {
    pub production: usize,
    pub dot: usize,
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.production, self.dot).cmp(&(other.production, other.dot))
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Item {
    /// Returns a new item for a given production with the dot at the left
    pub fn new_production(p: usize) -> Item {
        Item {
            production: p,
            dot: 0,
        }
    }

    /// Returns a copy of the item with the dot advanced one position. The
    /// production is not checked to ensure the advanced position is valid.
    pub fn advance(&self) -> Item {
        Item {
            production: self.production,
            dot: self.dot + 1,
        }
    }

    /// Returns true if the dot is at the right
    pub fn is_end(&self, g: &Grammar) -> bool {
        self.dot == g.production(self.production).rhs_len()
    }

    /// Returns the symbol immediately after the dot, if any
    pub fn next_symbol(&self, g: &Grammar) -> Option<Symbol> {
        let production = g.production(self.production);
        if self.dot < production.rhs_len() {
            Some(production.body[self.dot])
        } else {
            None
        }
    }
}

/// A hashable ItemSet, suitable for use in a HashMap of item sets. Equality
/// is set equality, so state reuse never depends on insertion order.
pub struct ItemStateSet(pub ItemSet);

impl PartialEq for ItemStateSet {
    fn eq(&self, other: &ItemStateSet) -> bool {
        self.0.is_subset(&other.0) && other.0.is_subset(&self.0)
    }
}

impl Eq for ItemStateSet {}

impl Hash for ItemStateSet {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        let mut a: Vec<&Item> = self.0.iter().collect();
        a.sort();
        for s in a.iter() {
            s.hash(state);
        }
    }
}

/// The canonical collection of sets of LR(0) items for an augmented
/// grammar, along with the transition function discovered while building
/// it: `transitions[state][symbol]` is the target state of
/// goto(state, symbol), if non-empty.
pub struct Collection {
    pub sets: Vec<ItemSet>,
    pub transitions: Vec<Vec<Option<usize>>>,
}

impl Collection {
    /// Returns the canonical collection for the given augmented grammar
    pub fn new(g: &Grammar) -> Collection {
        canonical_collection(g)
    }
}

/// Returns the canonical collection of sets of LR(0) items for the given
/// augmented grammar
fn canonical_collection(g: &Grammar) -> Collection {
    let start_set = ItemSet::from([Item::new_production(0)]);

    // Initialize the collection with CLOSURE(S' -> . S)
    let mut sets: Vec<ItemSet> = vec![closure(g, &start_set)];

    let mut seen: HashMap<ItemStateSet, usize> = HashMap::new();
    seen.insert(ItemStateSet(sets[0].clone()), 0);

    let mut transitions: Vec<Vec<Option<usize>>> = Vec::new();
    transitions.push(vec![None; g.symbols().len()]);

    let mut count = sets.len();
    loop {
        // Iterate through all the sets currently in the collection
        for i in 0..count {
            // For each grammar symbol X, if GOTO(i, X) is not empty and not
            // already in the collection, add it to the collection
            for symbol in g.symbols() {
                let set = goto(g, &sets[i], *symbol);
                if set.is_empty() {
                    continue;
                }

                let state_set = ItemStateSet(set.clone());
                let set_index = if let Some(idx) = seen.get(&state_set) {
                    *idx
                } else {
                    sets.push(set);
                    seen.insert(state_set, sets.len() - 1);
                    transitions.push(vec![None; g.symbols().len()]);

                    sets.len() - 1
                };

                // Record the transition for the symbol while we're here, so
                // the table builder can consume it unchanged
                match symbol {
                    Symbol::Terminal(id) | Symbol::NonTerminal(id) => {
                        match transitions[i][*id] {
                            None => {
                                transitions[i][*id] = Some(set_index);
                            }
                            Some(existing) if existing == set_index => (),
                            _ => {
                                // The same symbol from the same state always
                                // yields the same item set
                                panic!("conflict recording transitions");
                            }
                        }
                    }
                    Symbol::Empty => {
                        panic!("ε found in grammar symbols");
                    }
                }
            }
        }

        // Continue until no new sets are added to the collection on a round
        let new_count = sets.len();
        if new_count == count {
            break;
        }
        count = new_count;
    }

    Collection { sets, transitions }
}

/// Returns CLOSURE(items)
pub fn closure(g: &Grammar, items: &ItemSet) -> ItemSet {
    let mut closure = ItemSet::new();
    let mut seen: HashSet<usize> = HashSet::new();

    // First, add every item in items to CLOSURE(items)
    for item in items {
        closure.insert(*item);
    }

    // If A -> α . B β is in CLOSURE(items) and B -> γ is a production, add
    // the item B -> . γ to CLOSURE(items) if it is not already there. Apply
    // this rule until no more new items can be added.
    let mut count = closure.len();
    loop {
        for item in Vec::from_iter(closure.clone()) {
            if let Some(Symbol::NonTerminal(nt)) = item.next_symbol(g) {
                // Add B -> . γ for all productions of B if we haven't
                // previously added the productions for B
                if !seen.contains(&nt) {
                    for production in g.productions_for_non_terminal(nt) {
                        closure.insert(Item::new_production(*production));
                    }
                    seen.insert(nt);
                }
            }
        }

        let new_count = closure.len();
        if new_count == count {
            break;
        }
        count = new_count;
    }

    closure
}

/// Returns GOTO(items, s): the closure of the set of all items A -> α X . β
/// such that A -> α . X β is in items
pub fn goto(g: &Grammar, items: &ItemSet, s: Symbol) -> ItemSet {
    let mut goto = ItemSet::new();
    for item in items {
        if item.next_symbol(g) == Some(s) {
            goto.insert(item.advance());
        }
    }

    closure(g, &goto)
}
