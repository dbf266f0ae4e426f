//! The interactive and piped front ends.

use std::io::{self, BufRead, IsTerminal};

use anyhow::{Context, Result};
use figya::{
    commands::{Command, CommandOutput},
    persistence::Workspaces,
    router::Calculator,
    variables::VariableStore,
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::warn;

use crate::config::Config;

/// What one input line produced.
enum Outcome {
    Output(String),
    Error(String),
    Quit,
    Nothing,
}

/// One calculator session over a variable store.
pub struct Session {
    calc:       Calculator,
    store:      VariableStore,
    workspaces: Workspaces,
    autosave:   bool,
}

impl Session {
    pub fn new(workspaces: Workspaces, autosave: bool) -> Self {
        Self { calc: Calculator::new(),
               store: VariableStore::new(),
               workspaces,
               autosave }
    }

    /// Loads the previous session, if there is one.
    pub fn resume(&mut self) {
        self.workspaces.autoload(&mut self.store);
    }

    /// Evaluates `expr` and returns the result line.
    pub fn eval_once(&mut self, expr: &str) -> Result<Option<String>> {
        Ok(self.calc
               .evaluate(expr, &mut self.store)?
               .map(|evaluation| evaluation.to_string()))
    }

    /// Handles one line: commands first, then expressions.
    fn handle(&mut self, line: &str) -> Outcome {
        if let Some(command) = Command::parse(line) {
            return match command.execute(&mut self.store, &self.workspaces) {
                Ok(CommandOutput::Quit) => Outcome::Quit,
                Ok(CommandOutput::Text(text)) => {
                    if command.mutates_store() {
                        self.save();
                    }
                    Outcome::Output(text)
                },
                Err(e) => Outcome::Error(e.to_string()),
            };
        }

        match self.calc.evaluate(line, &mut self.store) {
            Ok(Some(evaluation)) => {
                self.save();
                Outcome::Output(evaluation.to_string())
            },
            Ok(None) => Outcome::Nothing,
            Err(e) => Outcome::Error(e.to_string()),
        }
    }

    fn save(&self) {
        if self.autosave
           && let Err(error) = self.workspaces.autosave(&self.store)
        {
            warn!(%error, "autosave failed");
        }
    }

    /// Reads lines from stdin until it ends, printing results to stdout and
    /// errors to stderr.
    pub fn run_piped(&mut self) -> Result<()> {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading standard input")?;
            match self.handle(&line) {
                Outcome::Output(text) => println!("{text}"),
                Outcome::Error(message) => eprintln!("error: {message}"),
                Outcome::Quit => break,
                Outcome::Nothing => {},
            }
        }
        self.save();
        Ok(())
    }

    /// Runs the line editor until `quit` or end of input.
    pub fn run_interactive(&mut self, config: &Config) -> Result<()> {
        let mut editor = DefaultEditor::new().context("initializing the line editor")?;
        let history = config.repl.history.then(|| self.workspaces.history_path());
        if let Some(path) = &history {
            editor.load_history(path).unwrap_or_default();
        }

        loop {
            let line = match editor.readline(&config.repl.prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("reading input"),
            };
            if line.trim().is_empty() {
                continue;
            }
            editor.add_history_entry(line.as_str())?;

            match self.handle(&line) {
                Outcome::Output(text) => print_indented(&text),
                Outcome::Error(message) => println!("  error: {message}"),
                Outcome::Quit => break,
                Outcome::Nothing => {},
            }
        }

        if let Some(path) = &history {
            std::fs::create_dir_all(self.workspaces.root())
                .with_context(|| format!("creating {}", self.workspaces.root().display()))?;
            editor.save_history(path)?;
        }
        self.save();
        Ok(())
    }
}

/// Runs a session on stdin, interactively if it is a terminal.
pub fn run(config: &Config) -> Result<()> {
    let workspaces = Workspaces::new(config.data_dir());
    let mut session = Session::new(workspaces, config.storage.autosave);
    session.resume();

    if io::stdin().is_terminal() {
        session.run_interactive(config)
    } else {
        session.run_piped()
    }
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("  {line}");
    }
}
