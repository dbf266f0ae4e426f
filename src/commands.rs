use crate::{
    interpreter::evaluator::function::core::BUILTIN_FUNCTIONS,
    persistence::{PersistenceError, Workspaces},
    variables::VariableStore,
};

/// Text shown by `help`.
pub const HELP_TEXT: &str = "\
figya, a terminal calculator

Expressions:
  2 + 2              arithmetic
  sin(pi/4)          functions (listed below)
  2^10               exponentiation
  17 // 5, 17 % 5    floor division and remainder
  5!                 factorial
  2pi                implicit multiplication
  hex(255)           base conversion (hex, oct, bin)

Unit conversions:
  5 feet in meters
  100 kg to pounds
  72 fahrenheit in celsius
  60 mph in km/h

Variables:
  $radius = 5        named variable
  $1, $2, ...        auto-named results
  $_                 last result

Commands:
  help               this message
  list               show all variables
  save <name>        save workspace
  restore            list saved workspaces
  restore <name>     restore workspace
  delete $var        delete a variable
  delete ws <name>   delete a workspace
  clear              clear all variables
  quit / exit        quit figya";

/// A session command. Keywords are case-insensitive; arguments keep their
/// case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `quit` or `exit`.
    Quit,
    /// `help`.
    Help,
    /// `list`.
    List,
    /// `clear`.
    Clear,
    /// `delete $var`; the `$` is optional.
    Delete(String),
    /// `delete ws <name>`.
    DeleteWorkspace(String),
    /// `save <name>`, or a bare `save`.
    Save(Option<String>),
    /// `restore <name>`, or a bare `restore`, which lists workspaces.
    Restore(Option<String>),
}

/// What a command asks the session to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Show this text and keep going.
    Text(String),
    /// End the session.
    Quit,
}

impl Command {
    /// Recognises a command line.
    ///
    /// Returns `None` for anything else, which is then evaluated as an
    /// expression.
    ///
    /// # Example
    /// ```
    /// use figya::commands::Command;
    ///
    /// assert_eq!(Command::parse("  EXIT "), Some(Command::Quit));
    /// assert_eq!(Command::parse("delete rate"), Some(Command::Delete("$rate".to_string())));
    /// assert_eq!(Command::parse("delete ws Taxes"),
    ///            Some(Command::DeleteWorkspace("Taxes".to_string())));
    /// assert_eq!(Command::parse("list + 1"), None);
    /// assert_eq!(Command::parse("2 + 2"), None);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace)
                                  .map_or((line, ""), |(k, r)| (k, r.trim()));

        match (keyword.to_lowercase().as_str(), rest) {
            ("quit" | "exit", "") => Some(Self::Quit),
            ("help", "") => Some(Self::Help),
            ("list", "") => Some(Self::List),
            ("clear", "") => Some(Self::Clear),
            ("save", "") => Some(Self::Save(None)),
            ("save", name) => Some(Self::Save(Some(name.to_string()))),
            ("restore", "") => Some(Self::Restore(None)),
            ("restore", name) => Some(Self::Restore(Some(name.to_string()))),
            ("delete", "") => None,
            ("delete", target) => Some(parse_delete(target)),
            _ => None,
        }
    }

    /// Runs the command against the session state.
    ///
    /// # Errors
    /// Returns a `PersistenceError` if a workspace cannot be read, written or
    /// named as given.
    pub fn execute(&self,
                   store: &mut VariableStore,
                   workspaces: &Workspaces)
                   -> Result<CommandOutput, PersistenceError> {
        let text = match self {
            Self::Quit => return Ok(CommandOutput::Quit),
            Self::Help => help(),
            Self::List => list(store),
            Self::Clear => {
                store.clear();
                "cleared".to_string()
            },
            Self::Delete(name) => {
                if store.delete(name) {
                    format!("{name} deleted")
                } else {
                    format!("{name} not found")
                }
            },
            Self::DeleteWorkspace(name) => {
                if workspaces.delete(name)? {
                    format!("workspace '{name}' deleted")
                } else {
                    format!("workspace '{name}' not found")
                }
            },
            Self::Save(None) => "usage: save <name>".to_string(),
            Self::Save(Some(name)) => {
                workspaces.save(name, store)?;
                format!("workspace '{name}' saved")
            },
            Self::Restore(None) => {
                let names = workspaces.list()?;
                if names.is_empty() {
                    "no saved workspaces".to_string()
                } else {
                    format!("workspaces: {}", names.join(", "))
                }
            },
            Self::Restore(Some(name)) => {
                if workspaces.restore(name, store)? {
                    format!("workspace '{name}' restored ({} variables)", store.len())
                } else {
                    format!("workspace '{name}' not found")
                }
            },
        };
        Ok(CommandOutput::Text(text))
    }

    /// Returns `true` for commands that may change the variable store.
    #[must_use]
    pub const fn mutates_store(&self) -> bool {
        matches!(self, Self::Clear | Self::Delete(_) | Self::Restore(Some(_)))
    }
}

fn parse_delete(target: &str) -> Command {
    if let Some((ws, name)) = target.split_once(char::is_whitespace)
       && ws.eq_ignore_ascii_case("ws")
    {
        return Command::DeleteWorkspace(name.trim().to_string());
    }
    if target.starts_with('$') {
        Command::Delete(target.to_string())
    } else {
        Command::Delete(format!("${target}"))
    }
}

/// [`HELP_TEXT`] followed by every builtin function name.
fn help() -> String {
    let rows: Vec<String> = BUILTIN_FUNCTIONS.chunks(8)
                                             .map(|names| format!("  {}", names.join(", ")))
                                             .collect();
    format!("{HELP_TEXT}\n\nFunctions:\n{}", rows.join(",\n"))
}

fn list(store: &VariableStore) -> String {
    let lines: Vec<String> = store.items()
                                  .map(|(name, value)| format!("{name} = {value}"))
                                  .collect();
    if lines.is_empty() {
        "no variables".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::core::Value;

    fn text(output: CommandOutput) -> String {
        match output {
            CommandOutput::Text(text) => text,
            CommandOutput::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn parsing() {
        assert_eq!(Command::parse("Help"), Some(Command::Help));
        assert_eq!(Command::parse("save"), Some(Command::Save(None)));
        assert_eq!(Command::parse("save  My Work "),
                   Some(Command::Save(Some("My Work".to_string()))));
        assert_eq!(Command::parse("restore"), Some(Command::Restore(None)));
        assert_eq!(Command::parse("delete $x"), Some(Command::Delete("$x".to_string())));
        assert_eq!(Command::parse("delete"), None);
        assert_eq!(Command::parse("quit now"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn list_and_delete() {
        let workspaces = Workspaces::new("/nonexistent/figya");
        let mut store = VariableStore::new();
        assert_eq!(text(Command::List.execute(&mut store, &workspaces).unwrap()), "no variables");

        store.set("b", Value::Number(2.0));
        store.add_result(Value::Number(1234.0));
        assert_eq!(text(Command::List.execute(&mut store, &workspaces).unwrap()),
                   "$1 = 1,234\n$b = 2");

        let delete = Command::parse("delete b").unwrap();
        assert_eq!(text(delete.execute(&mut store, &workspaces).unwrap()), "$b deleted");
        assert_eq!(text(delete.execute(&mut store, &workspaces).unwrap()), "$b not found");

        let delete_last = Command::parse("delete $_").unwrap();
        assert_eq!(text(delete_last.execute(&mut store, &workspaces).unwrap()), "$_ not found");
    }

    #[test]
    fn clear_and_quit() {
        let workspaces = Workspaces::new("/nonexistent/figya");
        let mut store = VariableStore::new();
        store.add_result(Value::Number(1.0));
        assert_eq!(text(Command::Clear.execute(&mut store, &workspaces).unwrap()), "cleared");
        assert!(store.is_empty());
        assert_eq!(Command::Quit.execute(&mut store, &workspaces).unwrap(), CommandOutput::Quit);
    }

    #[test]
    fn help_lists_every_function() {
        let workspaces = Workspaces::new("/nonexistent/figya");
        let mut store = VariableStore::new();
        let help = text(Command::Help.execute(&mut store, &workspaces).unwrap());
        assert!(help.starts_with(HELP_TEXT));
        let functions = help.split("Functions:\n").nth(1).unwrap();
        for name in BUILTIN_FUNCTIONS {
            assert!(functions.contains(name), "{name} missing from help");
        }
        assert!(functions.ends_with("max"));
    }

    #[test]
    fn bare_save_prints_usage() {
        let workspaces = Workspaces::new("/nonexistent/figya");
        let mut store = VariableStore::new();
        assert_eq!(text(Command::Save(None).execute(&mut store, &workspaces).unwrap()),
                   "usage: save <name>");
    }
}
