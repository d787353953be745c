use crate::engine::Engine;
use crate::parsers::Mode;

/// Outputs the full report as pretty-printed JSON, optionally parsing an
/// input first so the trace is included
pub fn output(
    grammar_text: &str,
    input: Option<&str>,
    mode: Mode,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let lines: Vec<&str> = grammar_text.lines().collect();

    let mut engine = Engine::new();
    engine.load_grammar(&lines)?;
    engine.build_table(mode)?;

    if let Some(input) = input {
        engine.parse(input);
    }

    println!("{}", serde_json::to_string_pretty(&engine.export())?);

    Ok(())
}
