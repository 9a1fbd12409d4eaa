use crate::{
    coerce::Value,
    command::Command,
    error::Error,
    flag::{Flag, LONG, SHORT},
    help,
    matcher::{resolve, Match},
    spell::Spell,
    style::Style,
    HELP,
};
use std::{
    borrow::Cow,
    collections::{BTreeMap, VecDeque},
};
use tracing::{debug, trace};

/// Values keyed by option and command names, plus the leftover arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub values: BTreeMap<String, Value>,
    pub leftover: Vec<Value>,
}

pub(crate) struct Context<'a> {
    arguments: &'a mut VecDeque<Cow<'static, str>>,
    program: &'a str,
    path: Vec<&'a str>,
    style: &'a dyn Style,
}

impl Evaluation {
    pub fn new<K: Into<String>>(
        values: impl IntoIterator<Item = (K, Value)>,
        leftover: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            leftover: leftover.into_iter().collect(),
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The evaluation of a nested command, if it was invoked.
    pub fn command(&self, name: &str) -> Option<&Evaluation> {
        match self.values.get(name) {
            Some(Value::Command(evaluation)) => Some(evaluation),
            _ => None,
        }
    }

    #[inline]
    pub fn into_pair(self) -> (BTreeMap<String, Value>, Vec<Value>) {
        (self.values, self.leftover)
    }
}

impl<'a> Context<'a> {
    pub fn new(
        arguments: &'a mut VecDeque<Cow<'static, str>>,
        program: &'a str,
        style: &'a dyn Style,
    ) -> Self {
        Self {
            arguments,
            program,
            path: Vec::new(),
            style,
        }
    }

    fn descend<'b>(&'b mut self, name: &'b str) -> Context<'b> {
        let mut path = self.path.clone();
        path.push(name);
        Context {
            arguments: self.arguments,
            program: self.program,
            path,
            style: self.style,
        }
    }

    fn value(&mut self, token: &str) -> Result<Cow<'static, str>, Error> {
        self.arguments
            .pop_front()
            .ok_or_else(|| Error::MissingOptionValue(Cow::Owned(token.to_owned())))
    }
}

impl Command {
    pub(crate) fn evaluate_in(&self, mut context: Context) -> Result<Evaluation, Error> {
        match self.walk(&mut context) {
            Ok(evaluation) => Ok(evaluation),
            Err(error) => Err(fill(error, self, &context)),
        }
    }

    fn walk(&self, context: &mut Context) -> Result<Evaluation, Error> {
        let mut values = self.defaults();
        let mut leftover = Vec::new();
        let mut positionals = self.positionals.iter().peekable();

        while let Some(token) = context.arguments.pop_front() {
            trace!(token = %token, path = ?context.path, "Dispatching token.");
            if let Some(long) = token.strip_prefix(LONG).filter(|long| !long.is_empty()) {
                let (name, flag) = self.resolve_long(&token, long)?;
                values.insert(name.to_owned(), Self::assign(flag, &token, context)?);
            } else if let Some(short) = short_name(&token) {
                let (name, flag) = self.resolve_short(&token, short)?;
                values.insert(name.to_owned(), Self::assign(flag, &token, context)?);
            } else if token == HELP && !self.commands.contains_key(HELP) {
                return Err(Error::Help(None));
            } else {
                let accepts = positionals.peek().is_some() || self.takes_arguments;
                let names = self.commands.keys().map(String::as_str);
                match resolve(&token, names, self.allow_abbreviated_commands) {
                    Match::Exact(name) | Match::Unique(name) => {
                        debug!(command = name, path = ?context.path, "Entering command.");
                        let evaluation = self.commands[name].evaluate_in(context.descend(name))?;
                        values.insert(name.to_owned(), Value::Command(evaluation));
                    }
                    Match::Ambiguous(candidates) if !accepts => {
                        return Err(Error::AmbiguousCommand(token, owned(candidates)));
                    }
                    Match::None if !accepts => {
                        let names = self.commands.keys().map(String::as_str);
                        let suggestions = Spell::new().suggest(&token, names, Spell::maximum(&token));
                        return Err(Error::UnknownCommand(token, owned(suggestions)));
                    }
                    _ => match positionals.next() {
                        Some(positional) => leftover.push(positional.coerce(&token)?),
                        None => leftover.push(Value::Text(token.into_owned())),
                    },
                }
            }
        }

        Ok(Evaluation { values, leftover })
    }

    /// Boolean flags and flags holding a literal default.
    fn defaults(&self) -> BTreeMap<String, Value> {
        self.options
            .iter()
            .filter_map(|(name, flag)| Some((name.clone(), flag.default_value()?.clone())))
            .collect()
    }

    fn resolve_long(&self, token: &str, long: &str) -> Result<(&str, &Flag), Error> {
        let names = self.options.values().filter_map(Flag::long_name);
        match resolve(long, names, true) {
            Match::Exact(long) | Match::Unique(long) => self
                .options
                .iter()
                .find(|(_, flag)| flag.long_name() == Some(long))
                .map(|(name, flag)| (name.as_str(), flag))
                .ok_or_else(|| self.unknown_option(token)),
            Match::Ambiguous(candidates) => Err(Error::AmbiguousOption(
                Cow::Owned(token.to_owned()),
                candidates
                    .into_iter()
                    .map(|long| Cow::Owned(format!("{LONG}{long}")))
                    .collect(),
            )),
            Match::None => Err(self.unknown_option(token)),
        }
    }

    fn resolve_short(&self, token: &str, short: char) -> Result<(&str, &Flag), Error> {
        let shorts = self
            .options
            .values()
            .filter_map(Flag::short_name)
            .map(String::from)
            .collect::<Vec<_>>();
        let short = short.to_string();
        match resolve(&short, shorts.iter().map(String::as_str), false).name() {
            Some(short) => self
                .options
                .iter()
                .find(|(_, flag)| flag.short_name().map(String::from).as_deref() == Some(short))
                .map(|(name, flag)| (name.as_str(), flag))
                .ok_or_else(|| self.unknown_option(token)),
            None => Err(self.unknown_option(token)),
        }
    }

    fn assign(flag: &Flag, token: &str, context: &mut Context) -> Result<Value, Error> {
        if flag.coercion().toggles() {
            Ok(flag.toggled())
        } else {
            let raw = context.value(token)?;
            flag.coerce(&raw)
        }
    }

    fn unknown_option(&self, token: &str) -> Error {
        let spellings = self
            .options
            .values()
            .flat_map(|flag| flag.spellings())
            .collect::<Vec<_>>();
        let suggestions = if token.starts_with(LONG) {
            Spell::new().suggest(token, spellings, Spell::maximum(token))
        } else {
            Vec::new()
        };
        Error::UnknownOption(
            Cow::Owned(token.to_owned()),
            suggestions.into_iter().map(Cow::Owned).collect(),
        )
    }
}

/// `-x`: a dash followed by exactly one character other than a dash.
fn short_name(token: &str) -> Option<char> {
    let mut letters = token.strip_prefix(SHORT)?.chars();
    match (letters.next(), letters.next()) {
        (Some(letter), None) if letter != '-' => Some(letter),
        _ => None,
    }
}

fn owned(names: Vec<&str>) -> Vec<Cow<'static, str>> {
    names
        .into_iter()
        .map(|name| Cow::Owned(name.to_owned()))
        .collect()
}

fn fill(error: Error, command: &Command, context: &Context) -> Error {
    match error {
        Error::Help(None) => Error::Help(
            help::help(command, context.program, &context.path, context.style).ok(),
        ),
        error => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_name("-a"), Some('a'));
        assert_eq!(short_name("-é"), Some('é'));
        assert_eq!(short_name("-"), None);
        assert_eq!(short_name("--"), None);
        assert_eq!(short_name("-ab"), None);
        assert_eq!(short_name("a"), None);
    }

    #[test]
    fn nested_lookup() {
        let evaluation = Evaluation::new(
            [("c", Value::Command(Evaluation::new([("a", "foo".into())], [])))],
            [],
        );
        assert_eq!(
            evaluation.command("c").and_then(|c| c.get("a")),
            Some(&Value::Text("foo".into()))
        );
        assert_eq!(evaluation.command("a"), None);
    }
}
