use std::{
    collections::{BTreeMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{error::VariableError, interpreter::value::core::Value};

/// Name of the slot that mirrors the most recent result.
pub const LAST_RESULT: &str = "$_";

/// Upper bound on substitution rounds before giving up.
pub const MAX_SUBSTITUTION_ROUNDS: usize = 100;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$[a-zA-Z_]\w*|\$\d+").expect("reference pattern is valid")
});

/// Results of a session, by name.
///
/// Every result gets an auto-name (`$1`, `$2`, ...) from a counter that only
/// ever grows within a session, so names are not reused after `delete`.
/// Assignments store under a user name instead. Either way the value is also
/// copied into `$_`, which cannot be deleted.
///
/// Entries are kept in byte order of their names, which puts `$10` before
/// `$2` in listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    vars:    BTreeMap<String, Value>,
    counter: u64,
    last:    Option<Value>,
}

/// Serialized form of a [`VariableStore`].
///
/// Written as `{"vars": {name: value}, "counter": n}`. On load, a missing
/// `vars` table is empty and a missing or malformed `counter` is `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every entry, including `$_`.
    #[serde(default)]
    pub vars:    BTreeMap<String, Value>,
    /// The auto-name counter.
    #[serde(default, deserialize_with = "lenient_counter")]
    pub counter: u64,
}

fn lenient_counter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_u64().unwrap_or_default())
}

impl VariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under a user name, adding the `$` prefix if missing.
    ///
    /// Overwrites any existing entry and updates `$_`. The auto-name counter
    /// is not touched.
    pub fn set(&mut self, name: &str, value: Value) {
        let name = if name.starts_with('$') {
            name.to_string()
        } else {
            format!("${name}")
        };
        self.store(name, value);
    }

    /// Stores `value` under the next auto-name and returns that name.
    ///
    /// # Example
    /// ```
    /// use figya::{interpreter::value::core::Value, variables::VariableStore};
    ///
    /// let mut store = VariableStore::new();
    /// assert_eq!(store.add_result(Value::Number(4.0)), "$1");
    /// assert_eq!(store.add_result(Value::Number(9.0)), "$2");
    /// assert_eq!(store.get("$_"), Some(&Value::Number(9.0)));
    /// ```
    pub fn add_result(&mut self, value: Value) -> String {
        self.counter += 1;
        let name = format!("${}", self.counter);
        self.store(name.clone(), value);
        name
    }

    fn store(&mut self, name: String, value: Value) {
        self.vars.insert(LAST_RESULT.to_string(), value.clone());
        self.vars.insert(name, value.clone());
        self.last = Some(value);
    }

    /// Looks up an entry by its full name, `$` included.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Removes an entry. Returns `false` if it does not exist or is `$_`.
    pub fn delete(&mut self, name: &str) -> bool {
        name != LAST_RESULT && self.vars.remove(name).is_some()
    }

    /// Removes every entry and resets the auto-name counter.
    pub fn clear(&mut self) {
        self.vars.clear();
        self.counter = 0;
        self.last = None;
    }

    /// All entries except `$_`, in byte order of their names.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars
            .iter()
            .filter(|(name, _)| *name != LAST_RESULT)
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries, `$_` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The most recently stored value.
    #[must_use]
    pub const fn last(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    /// The number of auto-names handed out so far.
    #[must_use]
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    /// Replaces every `$name` and `$N` reference in `expr` with its value.
    ///
    /// Substitution runs in rounds until no reference is left, because a
    /// restored text value may itself contain references. Every token may be
    /// replaced once per call, so a reference that comes back in a later
    /// round is a cycle, and so is a token written twice (`$a * $a`).
    ///
    /// # Errors
    /// - `UndefinedVariable` for a reference with no entry.
    /// - `CircularReference` for a reference that resolves back to itself.
    /// - `SubstitutionLimit` if no fixpoint is reached within
    ///   [`MAX_SUBSTITUTION_ROUNDS`] rounds.
    ///
    /// # Example
    /// ```
    /// use figya::{interpreter::value::core::Value, variables::VariableStore};
    ///
    /// let mut store = VariableStore::new();
    /// store.set("r", Value::Number(-2.0));
    /// assert_eq!(store.substitute("$r * 2").unwrap(), "(-2) * 2");
    /// assert!(store.substitute("$r * $r").is_err());
    /// assert!(store.substitute("$missing").is_err());
    /// ```
    pub fn substitute(&self, expr: &str) -> Result<String, VariableError> {
        let mut text = expr.to_string();
        let mut seen = HashSet::new();

        for round in 1..=MAX_SUBSTITUTION_ROUNDS {
            let references: Vec<String> = REFERENCE.find_iter(&text)
                                                   .map(|m| m.as_str().to_string())
                                                   .collect();
            if references.is_empty() {
                return Ok(text);
            }
            debug!(round, count = references.len(), "substituting variable references");

            for name in references {
                if seen.contains(&name) {
                    return Err(VariableError::CircularReference { name });
                }
                if !self.vars.contains_key(&name) {
                    return Err(VariableError::UndefinedVariable { name });
                }
                seen.insert(name);
            }

            text = REFERENCE.replace_all(&text, |caps: &regex::Captures| {
                                 self.vars
                                     .get(&caps[0])
                                     .map(Value::substitution_text)
                                     .unwrap_or_default()
                             })
                             .into_owned();
        }

        if REFERENCE.is_match(&text) {
            return Err(VariableError::SubstitutionLimit { rounds: MAX_SUBSTITUTION_ROUNDS });
        }
        Ok(text)
    }

    /// Captures the full state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { vars:    self.vars.clone(),
                   counter: self.counter, }
    }

    /// Replaces the full state with `snapshot`.
    ///
    /// The last value is taken from the `$_` entry, if there is one.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.last = snapshot.vars.get(LAST_RESULT).cloned();
        self.vars = snapshot.vars;
        self.counter = snapshot.counter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(x: f64) -> Value {
        Value::Number(x)
    }

    #[test]
    fn set_adds_prefix_and_updates_last() {
        let mut store = VariableStore::new();
        store.set("rate", num(0.07));
        assert_eq!(store.get("$rate"), Some(&num(0.07)));
        assert_eq!(store.get("$_"), Some(&num(0.07)));
        assert_eq!(store.last(), Some(&num(0.07)));
        assert_eq!(store.counter(), 0);
    }

    #[test]
    fn auto_names_are_not_reused() {
        let mut store = VariableStore::new();
        store.add_result(num(1.0));
        assert!(store.delete("$1"));
        assert_eq!(store.add_result(num(2.0)), "$2");
    }

    #[test]
    fn last_result_cannot_be_deleted() {
        let mut store = VariableStore::new();
        store.add_result(num(1.0));
        assert!(!store.delete("$_"));
        assert!(!store.delete("$nope"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn items_sort_lexicographically() {
        let mut store = VariableStore::new();
        for i in 1..=10 {
            store.add_result(num(f64::from(i)));
        }
        let names: Vec<&str> = store.items().map(|(name, _)| name).collect();
        assert_eq!(names[0], "$1");
        assert_eq!(names[1], "$10");
        assert_eq!(names[2], "$2");
        assert!(!names.contains(&"$_"));
    }

    #[test]
    fn clear_resets_counter() {
        let mut store = VariableStore::new();
        store.add_result(num(1.0));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.last(), None);
        assert_eq!(store.add_result(num(5.0)), "$1");
    }

    #[test]
    fn substitution_of_special_values() {
        let mut store = VariableStore::new();
        store.set("big", num(1e20));
        store.set("neg_inf", num(f64::NEG_INFINITY));
        store.set("h", Value::from("0xff"));
        assert_eq!(store.substitute("$big").unwrap(), "100000000000000000000");
        assert_eq!(store.substitute("$neg_inf").unwrap(), "(-inf)");
        assert_eq!(store.substitute("$h").unwrap(), "0xff");
    }

    #[test]
    fn undefined_reference() {
        let store = VariableStore::new();
        assert_eq!(store.substitute("1 + $x").unwrap_err(),
                   VariableError::UndefinedVariable { name: "$x".to_string() });
    }

    #[test]
    fn self_reference_is_circular() {
        let mut store = VariableStore::new();
        let mut vars = BTreeMap::new();
        vars.insert("$a".to_string(), Value::from("$a"));
        store.restore(Snapshot { vars,
                                 counter: 0 });
        assert_eq!(store.substitute("$a + 1").unwrap_err(),
                   VariableError::CircularReference { name: "$a".to_string() });
    }

    #[test]
    fn repeated_reference_is_circular() {
        // One substitution per token and call, even within a single round.
        let mut store = VariableStore::new();
        store.set("a", num(1.0));
        assert_eq!(store.substitute("$a + $a").unwrap_err(),
                   VariableError::CircularReference { name: "$a".to_string() });
    }

    #[test]
    fn long_reference_chain_hits_round_limit() {
        let mut store = VariableStore::new();
        for i in 0..150 {
            store.set(&format!("v{i}"), Value::from(format!("$v{}", i + 1)));
        }
        store.set("v150", num(1.0));
        assert_eq!(store.substitute("$v0").unwrap_err(),
                   VariableError::SubstitutionLimit { rounds: MAX_SUBSTITUTION_ROUNDS });
        assert_eq!(store.substitute("$v60").unwrap(), "1");
    }

    #[test]
    fn nested_references_resolve() {
        let mut store = VariableStore::new();
        let mut vars = BTreeMap::new();
        vars.insert("$a".to_string(), Value::from("$b + 1"));
        vars.insert("$b".to_string(), num(2.0));
        store.restore(Snapshot { vars,
                                 counter: 0 });
        assert_eq!(store.substitute("$a").unwrap(), "2 + 1");
    }

    #[test]
    fn text_without_references_is_unchanged() {
        let store = VariableStore::new();
        assert_eq!(store.substitute("2 * (3 + 4)").unwrap(), "2 * (3 + 4)");
        assert_eq!(store.substitute("5 $").unwrap(), "5 $");
    }

    #[test]
    fn restore_takes_last_from_slot() {
        let mut source = VariableStore::new();
        source.add_result(num(3.0));
        source.set("x", num(7.0));

        let mut store = VariableStore::new();
        store.restore(source.snapshot());
        assert_eq!(store, source);
        assert_eq!(store.last(), Some(&num(7.0)));
        assert_eq!(store.counter(), 1);
    }

    #[test]
    fn snapshot_json_shape() {
        let mut store = VariableStore::new();
        store.add_result(num(4.0));
        let json = serde_json::to_string(&store.snapshot()).unwrap();
        assert_eq!(json, r#"{"vars":{"$1":4.0,"$_":4.0},"counter":1}"#);
    }

    #[test]
    fn malformed_counter_defaults_to_zero() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"vars":{"$x":1},"counter":"seven"}"#).unwrap();
        assert_eq!(snapshot.counter, 0);
        assert_eq!(snapshot.vars.get("$x"), Some(&num(1.0)));

        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
