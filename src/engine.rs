use crate::errors::{Error, Result};
use crate::grammar::{Grammar, END_MARKER};
use crate::parsers::{driver, Mode, ParseStep, ParseTable, Trace};
use crate::report::Report;

/// A parser workbench owning one grammar and everything derived from it.
/// The grammar is immutable once loaded; building a table replaces the
/// FIRST/FOLLOW sets, the canonical collection and both tables together,
/// and clearing the cache restores the freshly-constructed state. An
/// engine is single-threaded; concurrent callers need an engine each.
#[derive(Default)]
pub struct Engine {
    grammar: Option<Grammar>,
    table: Option<ParseTable>,
    trace: Option<Trace>,
}

impl Engine {
    /// Returns a new, empty engine
    pub fn new() -> Engine {
        Engine::default()
    }

    /// Loads a grammar from text lines, discarding any previously loaded
    /// grammar and its derived artifacts. On failure the engine is left
    /// empty.
    pub fn load_grammar<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        self.clear_cache();
        self.grammar = Some(Grammar::from_lines(lines)?);
        Ok(())
    }

    /// Builds the parse table for the loaded grammar in the given mode. A
    /// fatal conflict leaves the engine without a table.
    pub fn build_table(&mut self, mode: Mode) -> Result<()> {
        self.table = None;

        let Some(g) = &self.grammar else {
            return Err(Error::InvalidGrammar("no grammar loaded".to_string()));
        };
        self.table = Some(ParseTable::new(g, mode)?);

        Ok(())
    }

    /// Parses an input string against the built table, recording the trace.
    /// Without a built table the very first lookup fails, which yields a
    /// one-step failing trace.
    pub fn parse(&mut self, input: &str) -> &Trace {
        let trace = match (&self.grammar, &self.table) {
            (Some(g), Some(t)) => driver::parse(g, t, input),
            _ => missing_table_trace(input),
        };

        self.trace.insert(trace)
    }

    /// Resets the engine to its post-construction state, dropping the
    /// grammar and every derived artifact
    pub fn clear_cache(&mut self) {
        self.grammar = None;
        self.table = None;
        self.trace = None;
    }

    /// Flattens the current artifacts into the export structure
    pub fn export(&self) -> Report {
        Report::build(
            self.grammar.as_ref(),
            self.table.as_ref(),
            self.trace.as_ref(),
        )
    }

    /// Returns the loaded grammar, if any
    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_ref()
    }

    /// Returns the built parse table, if any
    pub fn table(&self) -> Option<&ParseTable> {
        self.table.as_ref()
    }

    /// Returns the trace of the most recent parse, if any
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }
}

/// Builds the trace a table lookup in the initial configuration would
/// produce when no table exists
fn missing_table_trace(input: &str) -> Trace {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    Trace {
        steps: vec![ParseStep {
            step: 1,
            state_stack: "0 ".to_string(),
            symbol_stack: format!("{} ", END_MARKER),
            current_input: tokens.first().copied().unwrap_or(END_MARKER).to_string(),
            remaining_input: tokens.join(" "),
            action: "Error: No ACTION entry".to_string(),
        }],
        accepted: false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EXPR: &[&str] = &[
        "NonTerminals: E, T, F",
        "Terminals: id, +, *, (, )",
        "StartSymbol: E",
        "Productions:",
        "E -> E + T | T",
        "T -> T * F | F",
        "F -> ( E ) | id",
    ];

    #[test]
    fn test_load_build_parse() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new();
        engine.load_grammar(EXPR)?;
        engine.build_table(Mode::Slr1)?;

        assert!(engine.parse("id + id * id").accepted);
        assert!(!engine.parse("id + +").accepted);

        Ok(())
    }

    #[test]
    fn test_load_failure_leaves_engine_empty() {
        let mut engine = Engine::new();
        engine
            .load_grammar(EXPR)
            .expect("failed to load valid grammar");

        assert!(engine.load_grammar(&["Terminals: a"]).is_err());
        assert!(engine.grammar().is_none());
        assert!(engine.table().is_none());
    }

    #[test]
    fn test_build_without_grammar() {
        let mut engine = Engine::new();
        assert!(engine.build_table(Mode::Slr1).is_err());
        assert!(engine.table().is_none());
    }

    #[test]
    fn test_build_failure_leaves_no_table() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let mut engine = Engine::new();
        engine.load_grammar(&[
            "NonTerminals: S, A, B",
            "Terminals: a",
            "StartSymbol: S",
            "Productions:",
            "S -> A | B",
            "A -> a",
            "B -> a",
        ])?;

        assert!(engine.build_table(Mode::Slr1).is_err());
        assert!(engine.table().is_none());

        // The grammar itself survives a failed build
        assert!(engine.grammar().is_some());

        Ok(())
    }

    #[test]
    fn test_parse_without_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new();
        engine.load_grammar(EXPR)?;

        let trace = engine.parse("id + id");
        assert!(!trace.accepted);
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.steps[0].action, "Error: No ACTION entry");

        Ok(())
    }

    #[test]
    fn test_clear_cache() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new();
        engine.load_grammar(EXPR)?;
        engine.build_table(Mode::Slr1)?;
        engine.parse("id");

        engine.clear_cache();
        assert!(engine.grammar().is_none());
        assert!(engine.table().is_none());
        assert!(engine.trace().is_none());
        assert_eq!(engine.export(), Report::build(None, None, None));

        Ok(())
    }

    #[test]
    fn test_clear_and_reload_round_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new();
        engine.load_grammar(EXPR)?;
        engine.build_table(Mode::Slr1)?;
        let first = engine.export();

        engine.clear_cache();
        engine.load_grammar(EXPR)?;
        engine.build_table(Mode::Slr1)?;
        let second = engine.export();

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn test_rebuild_replaces_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new();
        engine.load_grammar(EXPR)?;

        engine.build_table(Mode::Lr0)?;
        assert_eq!(engine.table().map(|t| t.mode()), Some(Mode::Lr0));

        engine.build_table(Mode::Slr1)?;
        assert_eq!(engine.table().map(|t| t.mode()), Some(Mode::Slr1));

        Ok(())
    }

    #[test]
    fn test_export_includes_trace() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut engine = Engine::new();
        engine.load_grammar(EXPR)?;
        engine.build_table(Mode::Slr1)?;
        engine.parse("id * id");

        let report = engine.export();
        assert!(report.parse_result);
        assert_eq!(
            report.parse_steps.len(),
            engine.trace().map(|t| t.steps.len()).unwrap_or(0)
        );

        Ok(())
    }
}
