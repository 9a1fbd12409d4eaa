use crate::{
    coerce::Value,
    defaults::{Defaults, Entry},
    error::Error,
    flag::Flag,
    node::{describe, Node},
    positional::Positional,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A container of options, positionals and nested commands.
///
/// The mappings are public and read at evaluation time, so members may be
/// added or removed between evaluations.
#[derive(Debug, Clone)]
pub struct Command {
    pub(crate) node: Node,
    pub options: BTreeMap<String, Flag>,
    pub positionals: Vec<Positional>,
    pub commands: BTreeMap<String, Command>,
    /// Resolve unique prefixes of nested command names.
    pub allow_abbreviated_commands: bool,
    /// Keep unclaimed arguments as leftover instead of failing on them.
    pub takes_arguments: bool,
}

/// Declares the members of a command on a type.
///
/// [`Command::declare`] reads the declaration once, keyed by the names the
/// type gives its members; explicit builder calls may then add to it.
///
/// ```
/// use opts::{Command, Declare, Error, Flag};
///
/// struct Remote;
///
/// impl Declare for Remote {
///     fn options() -> Result<Vec<(&'static str, Flag)>, Error> {
///         Ok(vec![("verbose", Flag::both('v', "verbose")?.boolean())])
///     }
///
///     fn commands() -> Result<Vec<(&'static str, Command)>, Error> {
///         Ok(vec![("add", Command::new()), ("remove", Command::new())])
///     }
/// }
///
/// let remote = Command::declare::<Remote>()?;
/// assert!(remote.options.contains_key("verbose"));
/// assert_eq!(remote.commands.len(), 2);
/// # Ok::<(), Error>(())
/// ```
pub trait Declare {
    const ALLOW_ABBREVIATED_COMMANDS: bool = true;
    const TAKES_ARGUMENTS: bool = true;

    fn options() -> Result<Vec<(&'static str, Flag)>, Error> {
        Ok(Vec::new())
    }

    fn positionals() -> Vec<Positional> {
        Vec::new()
    }

    fn commands() -> Result<Vec<(&'static str, Command)>, Error> {
        Ok(Vec::new())
    }

    fn describe(_node: &mut Node) {}
}

describe!(Command);

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl Command {
    pub const fn new() -> Self {
        Self {
            node: Node::new(),
            options: BTreeMap::new(),
            positionals: Vec::new(),
            commands: BTreeMap::new(),
            allow_abbreviated_commands: true,
            takes_arguments: true,
        }
    }

    pub fn declare<D: Declare>() -> Result<Self, Error> {
        let mut command = Self::new()
            .options(D::options()?)
            .positionals(D::positionals())
            .commands(D::commands()?)
            .allow_abbreviations(D::ALLOW_ABBREVIATED_COMMANDS)
            .accept_arguments(D::TAKES_ARGUMENTS);
        D::describe(&mut command.node);
        Ok(command)
    }

    pub fn option(mut self, name: impl Into<String>, flag: Flag) -> Self {
        self.options.insert(name.into(), flag);
        self
    }

    pub fn options<N: Into<String>>(mut self, options: impl IntoIterator<Item = (N, Flag)>) -> Self {
        self.options
            .extend(options.into_iter().map(|(name, flag)| (name.into(), flag)));
        self
    }

    pub fn positional(mut self, positional: Positional) -> Self {
        self.positionals.push(positional);
        self
    }

    pub fn positionals(mut self, positionals: impl IntoIterator<Item = Positional>) -> Self {
        self.positionals.extend(positionals);
        self
    }

    pub fn command(mut self, name: impl Into<String>, command: Command) -> Self {
        self.commands.insert(name.into(), command);
        self
    }

    pub fn commands<N: Into<String>>(
        mut self,
        commands: impl IntoIterator<Item = (N, Command)>,
    ) -> Self {
        self.commands
            .extend(commands.into_iter().map(|(name, command)| (name.into(), command)));
        self
    }

    pub fn allow_abbreviations(mut self, allow: bool) -> Self {
        self.allow_abbreviated_commands = allow;
        self
    }

    pub fn accept_arguments(mut self, accept: bool) -> Self {
        self.takes_arguments = accept;
        self
    }

    /// Seeds option defaults from a mapping shaped like an evaluation's values.
    ///
    /// Tables apply to the nested command of the same name, at any depth.
    /// Values are adopted through the option's coercer. Keys that name
    /// nothing are ignored. Every value is adopted before any default is
    /// replaced, so on failure the tree is left as it was.
    pub fn apply_defaults(&mut self, defaults: &Defaults) -> Result<(), Error> {
        let mut staged = Vec::new();
        self.stage(defaults, &[], &mut staged)?;
        for (path, name, value) in staged {
            let command = path
                .iter()
                .try_fold(&mut *self, |command, segment| command.commands.get_mut(segment));
            if let Some(flag) = command.and_then(|command| command.options.get_mut(&name)) {
                debug!(path = ?path, option = %name, value = %value, "Applying default.");
                flag.replace_default(value);
            }
        }
        Ok(())
    }

    fn stage(
        &self,
        defaults: &Defaults,
        path: &[String],
        staged: &mut Vec<(Vec<String>, String, Value)>,
    ) -> Result<(), Error> {
        for (name, entry) in defaults {
            match (entry, self.options.get(name), self.commands.get(name)) {
                (Entry::Table(defaults), _, Some(command)) => {
                    let mut path = path.to_vec();
                    path.push(name.clone());
                    command.stage(defaults, &path, staged)?;
                }
                (Entry::Value(value), Some(flag), _) => {
                    staged.push((path.to_vec(), name.clone(), flag.adopt(value.clone())?));
                }
                _ => warn!(path = ?path, key = %name, "Default matches no option or command."),
            }
        }
        Ok(())
    }
}
