use crate::engine::Engine;
use crate::errors::Result;
use crate::parsers::Mode;

/// Parses an input string and prints the step trace
pub fn output(grammar_text: &str, input: &str, mode: Mode) -> Result<()> {
    let lines: Vec<&str> = grammar_text.lines().collect();

    let mut engine = Engine::new();
    engine.load_grammar(&lines)?;
    engine.build_table(mode)?;

    let trace = engine.parse(input);

    let state_width = column_width(trace.steps.iter().map(|s| s.state_stack.trim_end()), 11);
    let symbol_width = column_width(trace.steps.iter().map(|s| s.symbol_stack.trim_end()), 12);
    let input_width = column_width(trace.steps.iter().map(|s| s.remaining_input.as_str()), 5);

    println!(
        "{:>4}  {:state_width$}  {:symbol_width$}  {:>input_width$}  {}",
        "Step", "State stack", "Symbol stack", "Input", "Action"
    );
    for step in &trace.steps {
        println!(
            "{:>4}  {:state_width$}  {:symbol_width$}  {:>input_width$}  {}",
            step.step,
            step.state_stack.trim_end(),
            step.symbol_stack.trim_end(),
            step.remaining_input,
            step.action,
        );
    }

    println!();
    println!(
        "{}",
        if trace.accepted {
            "Input accepted"
        } else {
            "Input rejected"
        }
    );

    Ok(())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: usize) -> usize {
    values.map(|v| v.len()).max().unwrap_or(0).max(header)
}
