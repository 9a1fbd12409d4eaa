use crate::{case::Case, coerce::Value, command::Command, error::Error};
use std::collections::{btree_map, BTreeMap, HashMap};

/// Seed values for option defaults, shaped like an evaluation's values:
/// option names map to values and command names map to nested tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defaults(BTreeMap<String, Entry>);

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Value(Value),
    Table(Defaults),
}

impl Defaults {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), Entry::Value(value.into()));
        self
    }

    pub fn table(mut self, name: impl Into<String>, defaults: Defaults) -> Self {
        self.0.insert(name.into(), Entry::Table(defaults));
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.0.get(name)
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, String, Entry> {
        self.0.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Layers `other` over `self`; nested tables merge recursively.
    pub fn merge(mut self, other: Defaults) -> Self {
        for (name, entry) in other.0 {
            let entry = match (self.0.remove(&name), entry) {
                (Some(Entry::Table(left)), Entry::Table(right)) => Entry::Table(left.merge(right)),
                (_, entry) => entry,
            };
            self.0.insert(name, entry);
        }
        self
    }

    /// Reads a JSON object, converted as by `TryFrom<serde_json::Value>`.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Self::try_from(serde_json::from_str::<serde_json::Value>(text)?)
    }

    /// Collects `PREFIX_COMMAND_OPTION` variables for every option of `command`.
    ///
    /// Each path segment is converted to upper snake case, so the option
    /// `dry-run` of the command `stash` under prefix `git` reads
    /// `GIT_STASH_DRY_RUN`. Values are taken as raw text.
    pub fn from_environment<K: AsRef<str>, V: Into<String>>(
        command: &Command,
        prefix: &str,
        variables: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let variables = variables
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_owned(), value.into()))
            .collect::<HashMap<_, _>>();
        let case = Case::Snake { upper: true };
        let prefix = case.convert(prefix);
        Self::environment(command, &prefix, case, &variables)
    }

    fn environment(
        command: &Command,
        prefix: &str,
        case: Case,
        variables: &HashMap<String, String>,
    ) -> Self {
        let key = |name: &str| {
            let name = case.convert(name);
            if prefix.is_empty() {
                name
            } else {
                format!("{prefix}_{name}")
            }
        };

        let mut defaults = Defaults::new();
        for name in command.options.keys() {
            if let Some(value) = variables.get(&key(name)) {
                defaults = defaults.value(name.clone(), Value::Text(value.clone()));
            }
        }
        for (name, command) in command.commands.iter() {
            let nested = Self::environment(command, &key(name), case, variables);
            if !nested.is_empty() {
                defaults = defaults.table(name.clone(), nested);
            }
        }
        defaults
    }
}

impl TryFrom<serde_json::Value> for Defaults {
    type Error = Error;

    /// Objects become tables, strings text, booleans booleans, integral
    /// numbers integers, other numbers floats and arrays lists; `null` is
    /// skipped.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(object) = value else {
            return Err(Error::Other("Defaults must be a JSON object.".into()));
        };

        let mut defaults = Defaults::new();
        for (name, value) in object {
            let entry = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::Bool(value) => Entry::Value(Value::Boolean(value)),
                serde_json::Value::Number(number) => match number.as_i64() {
                    Some(value) => Entry::Value(Value::Integer(value)),
                    None => match number.as_f64() {
                        Some(value) => Entry::Value(Value::Float(value)),
                        None => Entry::Value(Value::Text(number.to_string())),
                    },
                },
                serde_json::Value::String(value) => Entry::Value(Value::Text(value)),
                serde_json::Value::Array(values) => Entry::Value(Value::List(
                    values
                        .into_iter()
                        .map(|value| match value {
                            serde_json::Value::String(value) => value,
                            value => value.to_string(),
                        })
                        .collect(),
                )),
                value @ serde_json::Value::Object(_) => Entry::Table(Self::try_from(value)?),
            };
            defaults.0.insert(name, entry);
        }
        Ok(defaults)
    }
}

impl<'a> IntoIterator for &'a Defaults {
    type Item = (&'a String, &'a Entry);
    type IntoIter = btree_map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::Flag;

    #[test]
    fn reads_nested_json() -> Result<(), Error> {
        let defaults = Defaults::from_json(
            r#"{ "activate": true, "depth": 3, "ratio": 0.5, "foo": { "spam": "bla", "tags": ["a", 1] }, "gone": null }"#,
        )?;
        let expected = Defaults::new()
            .value("activate", true)
            .value("depth", 3i64)
            .value("ratio", 0.5)
            .table(
                "foo",
                Defaults::new()
                    .value("spam", "bla")
                    .value("tags", vec!["a".to_owned(), "1".to_owned()]),
            );
        assert_eq!(defaults, expected);
        Ok(())
    }

    #[test]
    fn rejects_non_objects() {
        assert!(Defaults::from_json("[1, 2]").is_err());
        assert!(matches!(Defaults::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn merges_recursively() {
        let file = Defaults::new()
            .value("a", 1i64)
            .table("c", Defaults::new().value("x", "file").value("y", "file"));
        let environment = Defaults::new().table("c", Defaults::new().value("y", "environment"));
        let merged = file.merge(environment);
        assert_eq!(
            merged,
            Defaults::new()
                .value("a", 1i64)
                .table("c", Defaults::new().value("x", "file").value("y", "environment"))
        );
    }

    #[test]
    fn reads_environment_by_path() -> Result<(), Error> {
        let command = Command::new()
            .option("verbose", Flag::short('v')?.boolean())
            .command(
                "stash",
                Command::new().option("dry-run", Flag::long("dry-run")?.boolean()),
            );
        let defaults = Defaults::from_environment(
            &command,
            "git",
            [
                ("GIT_VERBOSE", "true"),
                ("GIT_STASH_DRY_RUN", "false"),
                ("GIT_UNRELATED", "x"),
            ],
        );
        assert_eq!(
            defaults,
            Defaults::new()
                .value("verbose", "true")
                .table("stash", Defaults::new().value("dry-run", "false"))
        );
        Ok(())
    }
}
