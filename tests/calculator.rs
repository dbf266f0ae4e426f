use std::fs;

use figya::{
    commands::{Command, CommandOutput},
    error::{Error, RuntimeError},
    interpreter::value::core::Value,
    persistence::Workspaces,
    router::Calculator,
    variables::VariableStore,
};

/// Runs `line` the way a session does: commands first, then expressions.
fn run_line(calc: &Calculator,
            store: &mut VariableStore,
            workspaces: &Workspaces,
            line: &str)
            -> String {
    if let Some(command) = Command::parse(line) {
        return match command.execute(store, workspaces) {
            Ok(CommandOutput::Text(text)) => text,
            Ok(CommandOutput::Quit) => "quit".to_string(),
            Err(e) => format!("error: {e}"),
        };
    }
    match calc.evaluate(line, store) {
        Ok(Some(evaluation)) => evaluation.to_string(),
        Ok(None) => String::new(),
        Err(e) => format!("error: {e}"),
    }
}

#[test]
fn readme_examples_work() {
    let readme = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))
        .unwrap_or_else(|e| panic!("Failed to read README.md: {e}"));
    let dir = tempfile::tempdir().unwrap();

    let mut count = 0;
    for block in extract_session_blocks(&readme) {
        let calc = Calculator::new();
        let mut store = VariableStore::new();
        let workspaces = Workspaces::new(dir.path());

        for (input, expected) in block {
            count += 1;
            let actual = run_line(&calc, &mut store, &workspaces, &input);
            assert_eq!(actual, expected, "README example '{input}'");
        }
    }

    assert!(count > 0, "No session examples found in README.md");
}

/// Collects `(input, expected output)` pairs from every ```figya block.
///
/// Input lines start with `> `; every line up to the next input is output.
fn extract_session_blocks(content: &str) -> Vec<Vec<(String, String)>> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut pairs: Vec<(String, String)> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```figya") {
            inside = true;
            pairs.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(pairs.clone());
            continue;
        }
        if !inside {
            continue;
        }
        if let Some(input) = line.strip_prefix("> ") {
            pairs.push((input.to_string(), String::new()));
        } else if let Some((_, output)) = pairs.last_mut() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(line);
        }
    }

    blocks
}

fn evaluate_all(lines: &[&str]) -> (VariableStore, Vec<String>) {
    let calc = Calculator::new();
    let mut store = VariableStore::new();
    let outputs = lines.iter()
                       .map(|line| match calc.evaluate(line, &mut store) {
                           Ok(Some(evaluation)) => evaluation.to_string(),
                           Ok(None) => String::new(),
                           Err(e) => format!("error: {e}"),
                       })
                       .collect();
    (store, outputs)
}

#[test]
fn exponent_notation_becomes_implicit_multiplication() {
    let (store, outputs) = evaluate_all(&["1e3", "2.5e-3 * 4", "2e"]);
    assert_eq!(outputs,
               ["error: name 'e3' is not defined", "$1 = -5.204295429", "$2 = 5.436563657"]);
    assert_eq!(store.counter(), 2);
}

#[test]
fn power_binds_tighter_than_multiplication() {
    let (_, outputs) = evaluate_all(&["2*3^2", "2^3^2", "2^3+1", "2**-1"]);
    assert_eq!(outputs, ["$1 = 18", "$2 = 512", "$3 = 9", "$4 = 0.5"]);
}

#[test]
fn repeated_variable_is_a_circular_reference() {
    let (store, outputs) = evaluate_all(&["$x = 3", "$x * $x", "$x ^ 2"]);
    assert_eq!(outputs, ["$x = 3", "error: circular reference: $x", "$1 = 9"]);
    assert_eq!(store.counter(), 1);
}

#[test]
fn deep_nesting_is_an_error_line() {
    let deep = format!("{}1{}", "(".repeat(700), ")".repeat(700));
    let signs = format!("{}1", "-".repeat(200_000));
    let (store, outputs) = evaluate_all(&[deep.as_str(),
                                            signs.as_str(),
                                            "1 (((m^1024)^1024)^1024)^1024 in m"]);
    assert_eq!(outputs[0], "error: syntax error: expression nested more than 200 levels deep");
    assert_eq!(outputs[1], outputs[0]);
    assert!(outputs[2].starts_with("error: "), "{}", outputs[2]);
    assert!(store.is_empty());
}

#[test]
fn base_conversions_are_stored_as_text() {
    let (store, outputs) = evaluate_all(&["hex(255)", "bin(-5)", "$1 + 1"]);
    assert_eq!(outputs[0], "$1 = 0xff");
    assert_eq!(outputs[1], "$2 = -0b101");
    assert_eq!(store.get("$1"), Some(&Value::from("0xff")));
    assert!(outputs[2].starts_with("error: "), "{}", outputs[2]);
}

#[test]
fn command_words_are_plain_names_to_the_router() {
    let calc = Calculator::new();
    let mut store = VariableStore::new();
    assert_eq!(calc.evaluate("list", &mut store),
               Err(Error::Runtime(RuntimeError::UndefinedName { name: "list".to_string() })));
}

#[test]
fn fractional_factorial_is_a_syntax_error() {
    let (store, outputs) = evaluate_all(&["2.5!"]);
    assert!(outputs[0].starts_with("error: syntax error"), "{}", outputs[0]);
    assert!(store.is_empty());
}

#[test]
fn conversion_failures_fall_back_to_arithmetic() {
    let (_, outputs) = evaluate_all(&["5 kg in meters", "3 apples to pears"]);
    assert!(outputs.iter().all(|o| o.starts_with("error: ")), "{outputs:?}");
}

#[test]
fn temperatures() {
    let (_, outputs) = evaluate_all(&["72 fahrenheit in celsius",
                                      "100 celsius in fahrenheit",
                                      "0 c to kelvin"]);
    assert_eq!(outputs,
               ["$1 = 22.22222222 °C", "$2 = 212 °F", "$3 = 273.15 K"]);
}

#[test]
fn circular_text_references() {
    let mut store = VariableStore::new();
    store.set("a", Value::from("$b"));
    store.set("b", Value::from("$a"));
    let err = Calculator::new().evaluate("$a + 1", &mut store).unwrap_err();
    assert!(err.to_string().starts_with("circular reference"), "{err}");
}

#[test]
fn auto_names_are_not_reused_after_delete() {
    let calc = Calculator::new();
    let mut store = VariableStore::new();
    calc.evaluate("1", &mut store).unwrap();
    calc.evaluate("2", &mut store).unwrap();
    assert!(store.delete("$2"));
    let next = calc.evaluate("3", &mut store).unwrap().unwrap();
    assert_eq!(next.name, "$3");
}
