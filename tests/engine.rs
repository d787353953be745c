use lrlab::engine::Engine;
use lrlab::errors::Error;
use lrlab::parsers::{Mode, TableEntry};

mod common;

/// Loads a grammar fixture into an engine
fn load(engine: &mut Engine, filename: &str) {
    let text = common::read_test_file(filename);
    let lines: Vec<&str> = text.lines().collect();
    engine
        .load_grammar(&lines)
        .expect("failed to load test grammar");
}

#[test]
fn test_expression_grammar_accepts() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/expr.cfg");
    engine.build_table(Mode::Slr1)?;

    let trace = engine.parse("id + id * id");
    assert!(trace.accepted);

    let actions: Vec<&str> = trace.steps.iter().map(|s| s.action.as_str()).collect();
    assert_eq!(actions.last(), Some(&"Accept"));
    assert_eq!(actions[actions.len() - 2], "Reduce: E -> E + T ");
    assert_eq!(
        actions.iter().filter(|a| a.starts_with("Reduce:")).count(),
        8
    );

    Ok(())
}

#[test]
fn test_expression_grammar_rejects() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/expr.cfg");
    engine.build_table(Mode::Slr1)?;

    let trace = engine.parse("id + +");
    assert!(!trace.accepted);
    assert!(trace
        .steps
        .last()
        .expect("empty trace")
        .action
        .starts_with("Error: No ACTION entry"));

    let report = engine.export();
    assert!(!report.parse_result);

    Ok(())
}

#[test]
fn test_epsilon_grammar() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/epsilon.cfg");
    engine.build_table(Mode::Slr1)?;

    let report = engine.export();
    assert_eq!(report.first_set["A"], vec!["a", "ε"]);
    assert_eq!(report.follow_set["A"], vec!["b"]);

    let trace = engine.parse("b");
    assert!(trace.accepted);
    assert!(trace
        .steps
        .iter()
        .any(|s| s.action.starts_with("Reduce: A -> ε")));

    Ok(())
}

#[test]
fn test_lr0_slr1_divergence() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/divergence.cfg");

    // The LR(0) table construction reports conflicts but succeeds
    engine.build_table(Mode::Lr0)?;
    let lr0_conflicts = engine
        .table()
        .expect("no table after build")
        .conflicts()
        .len();
    assert!(lr0_conflicts >= 1);

    // The SLR(1) table is clean and accepts the input
    engine.build_table(Mode::Slr1)?;
    assert!(engine.table().expect("no table after build").conflicts().is_empty());
    assert!(engine.parse("b d c").accepted);

    Ok(())
}

#[test]
fn test_reduce_reduce_conflict() {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/rr_conflict.cfg");

    match engine.build_table(Mode::Slr1) {
        Err(Error::ReduceReduceConflict { symbol, .. }) => {
            assert_eq!(symbol, "#");
        }
        other => panic!("expected reduce-reduce conflict, got ok={}", other.is_ok()),
    }
    assert!(engine.table().is_none());
}

#[test]
fn test_augmentation_and_accept() -> std::result::Result<(), Box<dyn std::error::Error>> {
    for filename in ["grammars/expr.cfg", "grammars/epsilon.cfg", "grammars/divergence.cfg"] {
        let mut engine = Engine::new();
        load(&mut engine, filename);
        engine.build_table(Mode::Slr1)?;

        let g = engine.grammar().expect("no grammar after load");
        let table = engine.table().expect("no table after build");

        // State 0 contains the item S' -> . S
        let report = engine.export();
        let augmented_item = format!(
            "{} -> . {} ",
            report.augmented_start_symbol, report.start_symbol
        );
        assert!(report.item_sets[0].items.contains(&augmented_item));

        // Exactly one state accepts on the end-of-input marker, namely the
        // target of GOTO(0, S)
        let TableEntry::Goto(accept_state) = table.action(0, g.start()) else {
            panic!("no GOTO from state 0 on the start symbol");
        };
        let mut accepting: Vec<usize> = Vec::new();
        for state in 0..table.num_states() {
            if table.action(state, g.eof_index()) == TableEntry::Accept {
                accepting.push(state);
            }
        }
        assert_eq!(accepting, vec![accept_state]);
    }

    Ok(())
}

#[test]
fn test_follow_contains_end_marker() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/expr.cfg");
    engine.build_table(Mode::Slr1)?;

    let report = engine.export();
    assert!(report.follow_set[&report.start_symbol].contains(&"#".to_string()));

    // ε never appears in a FOLLOW set
    for names in report.follow_set.values() {
        assert!(!names.contains(&"ε".to_string()));
    }

    Ok(())
}

#[test]
fn test_trace_completeness() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/expr.cfg");
    engine.build_table(Mode::Slr1)?;

    // Every driver iteration leaves exactly one step, numbered from one,
    // and the final step is the terminal Accept or Error step
    for input in ["id", "id + id", "( id )", "id +", ")"] {
        let trace = engine.parse(input).clone();
        for (i, step) in trace.steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
        }
        let last = &trace.steps.last().expect("empty trace").action;
        assert!(last == "Accept" || last.starts_with("Error:"));
    }

    Ok(())
}

#[test]
fn test_clear_cache_round_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new();
    load(&mut engine, "grammars/expr.cfg");
    engine.build_table(Mode::Slr1)?;
    engine.parse("id * id");
    let first = engine.export();

    engine.clear_cache();
    load(&mut engine, "grammars/expr.cfg");
    engine.build_table(Mode::Slr1)?;
    engine.parse("id * id");
    let second = engine.export();

    assert_eq!(first, second);

    Ok(())
}
