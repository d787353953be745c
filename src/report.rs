//! Read-only projection of a grammar and its derived artifacts into a
//! serializable report. Two engines with identical derived artifacts
//! produce identical reports.

use crate::grammar::{FirstItem, Grammar, EPSILON};
use crate::parsers::items::Item;
use crate::parsers::{ParseStep, ParseTable, TableEntry, Trace};
use serde::Serialize;
use std::collections::BTreeMap;

/// The flattened export structure. ACTION entries use the compact string
/// encoding `sN` / `rN` / `acc` at this boundary only; everywhere else
/// actions are a proper sum type.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Report {
    pub start_symbol: String,
    pub augmented_start_symbol: String,
    pub non_terminals: Vec<String>,
    pub terminals: Vec<String>,
    pub productions: Vec<String>,
    pub first_set: BTreeMap<String, Vec<String>>,
    pub follow_set: BTreeMap<String, Vec<String>>,
    pub item_sets: Vec<ItemSetReport>,
    pub action_table: BTreeMap<String, BTreeMap<String, String>>,
    pub goto_table: BTreeMap<String, BTreeMap<String, usize>>,
    pub parse_steps: Vec<ParseStep>,
    pub parse_result: bool,
}

/// One state of the canonical collection with its items rendered as
/// dotted productions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSetReport {
    pub state: usize,
    pub items: Vec<String>,
}

impl Report {
    /// Flattens whatever artifacts exist. Fields whose source is absent
    /// stay empty, so the report is well-formed at every engine state.
    pub fn build(
        grammar: Option<&Grammar>,
        table: Option<&ParseTable>,
        trace: Option<&Trace>,
    ) -> Report {
        let mut report = Report::default();

        if let Some(g) = grammar {
            report.start_symbol = g.value(g.start()).to_string();
            report.augmented_start_symbol = g.value(g.augmented_start()).to_string();

            report.non_terminals = sorted_names(g, g.non_terminal_ids());
            report.terminals = sorted_names(g, g.terminal_ids());

            report.productions = (0..g.num_productions())
                .map(|i| format!("{}: {}", i, g.format_production(i)))
                .collect();

            if let Some(t) = table {
                flatten_first_follow(&mut report, g, t);
                flatten_item_sets(&mut report, g, t);
                flatten_tables(&mut report, g, t);
            }
        }

        if let Some(trace) = trace {
            report.parse_steps = trace.steps.clone();
            report.parse_result = trace.accepted;
        }

        report
    }
}

/// Returns the names of the given symbol IDs, sorted lexicographically
fn sorted_names(g: &Grammar, ids: &[usize]) -> Vec<String> {
    let mut names: Vec<String> = ids.iter().map(|i| g.value(*i).to_string()).collect();
    names.sort();
    names
}

/// Flattens the FIRST and FOLLOW sets, omitting the augmented start symbol
fn flatten_first_follow(report: &mut Report, g: &Grammar, t: &ParseTable) {
    for (id, set) in t.firsts().iter().enumerate() {
        if id == g.augmented_start() {
            continue;
        }

        let mut names: Vec<String> = Vec::new();
        for item in set {
            match item {
                FirstItem::Terminal(term) => names.push(g.value(*term).to_string()),
                FirstItem::Empty => names.push(EPSILON.to_string()),
            }
        }
        names.sort();
        report.first_set.insert(g.value(id).to_string(), names);
    }

    for (id, set) in t.follows() {
        if *id == g.augmented_start() {
            continue;
        }

        let mut names: Vec<String> = set.iter().map(|term| g.value(*term).to_string()).collect();
        names.sort();
        report.follow_set.insert(g.value(*id).to_string(), names);
    }
}

/// Flattens the canonical collection, items sorted by production and dot
fn flatten_item_sets(report: &mut Report, g: &Grammar, t: &ParseTable) {
    for (state, set) in t.sets().iter().enumerate() {
        let mut items: Vec<Item> = set.iter().cloned().collect();
        items.sort();

        report.item_sets.push(ItemSetReport {
            state,
            items: items
                .iter()
                .map(|i| g.format_item(i.production, i.dot))
                .collect(),
        });
    }
}

/// Flattens the ACTION and GOTO tables as nested state -> symbol maps,
/// keeping only the entries that exist
fn flatten_tables(report: &mut Report, g: &Grammar, t: &ParseTable) {
    for state in 0..t.num_states() {
        let mut actions: BTreeMap<String, String> = BTreeMap::new();
        for id in g.terminal_ids() {
            let value = match t.action(state, *id) {
                TableEntry::Shift(n) => format!("s{}", n),
                TableEntry::Reduce(p) => format!("r{}", p),
                TableEntry::Accept => "acc".to_string(),
                _ => continue,
            };
            actions.insert(g.value(*id).to_string(), value);
        }
        if !actions.is_empty() {
            report.action_table.insert(state.to_string(), actions);
        }

        let mut gotos: BTreeMap<String, usize> = BTreeMap::new();
        for id in g.non_terminal_ids() {
            if let TableEntry::Goto(n) = t.action(state, *id) {
                gotos.insert(g.value(*id).to_string(), n);
            }
        }
        if !gotos.is_empty() {
            report.goto_table.insert(state.to_string(), gotos);
        }
    }
}
