use super::{Grammar, Symbol};

pub type FirstSet = std::collections::HashSet<FirstItem>;
pub type FirstVector = Vec<FirstSet>;
pub type FollowSet = std::collections::HashSet<usize>;
pub type FollowMap = std::collections::HashMap<usize, FollowSet>;

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
/// An item in a FIRST set: a terminal ID, or ε
pub enum FirstItem {
    Terminal(usize),
    Empty,
}

/// Builds FIRST and FOLLOW sets for a grammar. FIRST is computed for every
/// symbol, FOLLOW for every non-terminal; ε never appears in a FOLLOW set.
pub struct Builder<'b> {
    g: &'b Grammar,
    pub firsts: FirstVector,
    pub follows: FollowMap,
}

impl<'b> Builder<'b> {
    /// Returns a new builder with both computations run to their fixed
    /// points. FIRST is computed before FOLLOW.
    pub fn new(g: &'b Grammar) -> Builder<'b> {
        let firsts: FirstVector = (0..g.symbols().len()).map(|_| FirstSet::new()).collect();

        let mut follows = FollowMap::new();
        for i in g.non_terminal_ids() {
            follows.insert(*i, FollowSet::new());
        }

        let mut b = Builder { g, firsts, follows };

        b.calculate_firsts();
        b.calculate_follows();

        b
    }

    /// Returns FOLLOW(nt)
    pub fn follow(&self, nt: usize) -> &FollowSet {
        &self.follows[&nt]
    }

    /// Calculates FIRST(symbol) for all grammar symbols
    fn calculate_firsts(&mut self) {
        // FIRST for a terminal is always the terminal itself
        for i in self.g.terminal_ids() {
            self.firsts[*i].insert(FirstItem::Terminal(*i));
        }

        // FIRST for non-terminals is an iterative process since productions
        // can refer to other non-terminals and to themselves. Iterate until
        // no more elements are added to any FIRST set.
        let mut count = 0;
        loop {
            for id in 0..self.g.num_productions() {
                self.first_production(id);
            }

            let this_count = self.firsts.iter().map(|set| set.len()).sum();
            if this_count == count {
                break;
            }
            count = this_count;
        }
    }

    /// Updates FIRST(head) with the contributions of one production
    fn first_production(&mut self, id: usize) {
        let production = self.g.production(id);
        let head = production.head;

        for symbol in &production.body {
            // If FIRST(symbol) does not contain ε, subsequent symbols
            // cannot contribute, so return
            if !self.first_symbol(head, *symbol) {
                return;
            }
        }

        // Every body symbol derives ε (vacuously so for an ε-production),
        // so FIRST(head) contains ε
        self.firsts[head].insert(FirstItem::Empty);
    }

    /// Updates FIRST(non_terminal) with the non-ε elements of
    /// FIRST(symbol). Returns true if FIRST(symbol) contains ε.
    fn first_symbol(&mut self, non_terminal: usize, symbol: Symbol) -> bool {
        let mut additions = FirstSet::new();
        let mut has_empty = false;

        match symbol {
            Symbol::NonTerminal(n) | Symbol::Terminal(n) => {
                for item in self.firsts[n].iter() {
                    match item {
                        FirstItem::Empty => {
                            has_empty = true;
                        }
                        FirstItem::Terminal(t) => {
                            additions.insert(FirstItem::Terminal(*t));
                        }
                    }
                }
            }
            Symbol::Empty => {
                has_empty = true;
            }
        }

        self.firsts[non_terminal].extend(additions);

        has_empty
    }

    /// Calculates FOLLOW sets for all non-terminals
    fn calculate_follows(&mut self) {
        // Seed the end-of-input marker into FOLLOW of the original start
        // symbol, not the augmented one
        let eof = self.g.eof_index();
        let start = self.g.start();
        self.follows.get_mut(&start).unwrap().insert(eof);

        let mut count = 1;
        loop {
            for id in 0..self.g.num_productions() {
                self.follow_production(id);
            }

            let this_count = self.follows.values().map(|s| s.len()).sum();
            if this_count == count {
                break;
            }
            count = this_count;
        }
    }

    /// Updates FOLLOW sets from a given production B -> α A β: FOLLOW(A)
    /// gains FIRST(β) without ε, and all of FOLLOW(B) when β derives ε
    /// (vacuously when β is empty)
    fn follow_production(&mut self, id: usize) {
        let production = self.g.production(id);

        for (i, symbol) in production.body.iter().enumerate() {
            let Symbol::NonTerminal(a) = symbol else {
                // FOLLOW is only calculated for non-terminals
                continue;
            };

            let (first_rest, derives_empty) = self.first_string(&production.body[(i + 1)..]);
            self.follows.get_mut(a).unwrap().extend(first_rest);

            if derives_empty && *a != production.head {
                let follow_head = self.follows[&production.head].clone();
                self.follows.get_mut(a).unwrap().extend(follow_head);
            }
        }
    }

    /// Returns FIRST(symbols) excluding ε as a set of terminal IDs. The
    /// second return value is true if every symbol derives ε, which is
    /// vacuously true for an empty string of symbols.
    fn first_string(&self, symbols: &[Symbol]) -> (FollowSet, bool) {
        let mut set = FollowSet::new();

        for symbol in symbols {
            let has_empty = match symbol {
                Symbol::Terminal(n) | Symbol::NonTerminal(n) => {
                    self.first_excluding_e(*n, &mut set)
                }
                Symbol::Empty => true,
            };

            // If FIRST(symbol) does not include ε then no later symbol can
            // influence FIRST(symbols)
            if !has_empty {
                return (set, false);
            }
        }

        (set, true)
    }

    /// Adds all elements of FIRST(symbol) to set, excluding ε. Returns true
    /// if ε is in FIRST(symbol).
    fn first_excluding_e(&self, symbol: usize, set: &mut FollowSet) -> bool {
        let mut has_empty = false;

        for item in &self.firsts[symbol] {
            match item {
                FirstItem::Empty => {
                    has_empty = true;
                }
                FirstItem::Terminal(t) => {
                    set.insert(*t);
                }
            }
        }

        has_empty
    }
}
