use lrlab::grammar::{Grammar, Symbol};

mod common;

#[test]
fn test_grammar_new() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let g = Grammar::new(&common::read_test_file("grammars/expr.cfg"))?;
    assert_eq!(g.num_productions(), 7);

    Ok(())
}

#[test]
fn test_grammar_new_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let g = Grammar::new_from_file(&common::test_file_path("grammars/epsilon.cfg"))?;
    assert_eq!(g.num_productions(), 4);

    Ok(())
}

#[test]
fn test_augmented_production_is_first() -> std::result::Result<(), Box<dyn std::error::Error>> {
    for filename in [
        "grammars/expr.cfg",
        "grammars/epsilon.cfg",
        "grammars/divergence.cfg",
        "grammars/rr_conflict.cfg",
    ] {
        let g = Grammar::new_from_file(&common::test_file_path(filename))?;

        let augmented = g.production(0);
        assert_eq!(augmented.head, g.augmented_start());
        assert_eq!(augmented.body, vec![Symbol::NonTerminal(g.start())]);

        for i in 1..g.num_productions() {
            assert_ne!(g.production(i).head, g.augmented_start());
            assert!(!g
                .production(i)
                .body
                .contains(&Symbol::NonTerminal(g.augmented_start())));
        }
    }

    Ok(())
}

#[test]
fn test_end_marker_always_present() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let g = Grammar::new_from_file(&common::test_file_path("grammars/rr_conflict.cfg"))?;
    assert_eq!(g.value(g.eof_index()), "#");
    assert!(g.terminal_ids().contains(&g.eof_index()));

    Ok(())
}
