use crate::{
    command::{Command, Declare},
    error::Error,
    flag::Flag,
    help,
    parse::{Context, Evaluation},
    positional::Positional,
    style::{self, Item, Style},
};
use core::ops::{Deref, DerefMut};
use std::{
    borrow::Cow,
    collections::VecDeque,
    env,
    fmt::Write as _,
    io::{self, Write},
    path::Path,
    process,
};
use tracing::debug;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 2;

/// The root command of a tree, plus where help and errors are written.
pub struct Parser {
    command: Command,
    name: Cow<'static, str>,
    out: Box<dyn Write>,
    style: Box<dyn Style>,
}

/// The process should terminate with this status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub code: i32,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Parser {
    type Target = Command;
    fn deref(&self) -> &Self::Target {
        &self.command
    }
}

impl DerefMut for Parser {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.command
    }
}

impl From<Command> for Parser {
    fn from(command: Command) -> Self {
        Self {
            command,
            name: program(),
            out: Box::new(io::stdout()),
            style: if termion::is_tty(&io::stdout()) {
                Box::new(style::Color)
            } else {
                Box::new(style::Plain)
            },
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::from(Command::new())
    }

    pub fn declare<D: Declare>() -> Result<Self, Error> {
        Ok(Self::from(Command::declare::<D>()?))
    }

    pub fn pipe<F: FnOnce(Self) -> Self>(self, pipe: F) -> Self {
        pipe(self)
    }

    /// The program name shown in usage lines.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.command.set_long_description(description);
        self
    }

    pub fn out(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn style(mut self, style: impl Style + 'static) -> Self {
        self.style = Box::new(style);
        self
    }

    pub fn option(self, name: impl Into<String>, flag: Flag) -> Self {
        self.map(|command| command.option(name, flag))
    }

    pub fn positional(self, positional: Positional) -> Self {
        self.map(|command| command.positional(positional))
    }

    pub fn command(self, name: impl Into<String>, command: Command) -> Self {
        self.map(|parent| parent.command(name, command))
    }

    pub fn allow_abbreviations(self, allow: bool) -> Self {
        self.map(|command| command.allow_abbreviations(allow))
    }

    /// Whether unclaimed arguments are kept as leftover at the root.
    pub fn takes_arguments(self, accept: bool) -> Self {
        self.map(|command| command.accept_arguments(accept))
    }

    fn map(mut self, map: impl FnOnce(Command) -> Command) -> Self {
        self.command = map(self.command);
        self
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> String {
        help::usage(&self.command, &self.name, &[])
    }

    pub fn evaluate<A: Into<Cow<'static, str>>>(
        &self,
        arguments: impl IntoIterator<Item = A>,
    ) -> Result<Evaluation, Error> {
        let mut arguments = arguments.into_iter().map(Into::into).collect::<VecDeque<_>>();
        debug!(program = %self.name, count = arguments.len(), "Evaluating arguments.");
        self.command
            .evaluate_in(Context::new(&mut arguments, &self.name, &*self.style))
    }

    /// Evaluates the arguments of the running process, minus the program name.
    pub fn evaluate_env(&self) -> Result<Evaluation, Error> {
        self.evaluate(env::args().skip(1))
    }

    /// Writes help or the failure to the output and tells how to exit.
    pub fn conclude(&mut self, result: Result<Evaluation, Error>) -> Result<Evaluation, Exit> {
        let (text, code) = match result {
            Ok(evaluation) => return Ok(evaluation),
            Err(Error::Help(Some(help))) => (help, SUCCESS),
            Err(Error::Help(None)) => (format!("{}\n", self.usage()), SUCCESS),
            Err(error) => match self.report(&error) {
                Ok(text) => (text, FAILURE),
                Err(_) => (format!("{}\n{error}\n", self.usage()), FAILURE),
            },
        };
        // Nothing more can be reported when the output itself fails.
        let _ = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush());
        Err(Exit { code })
    }

    pub fn evaluate_or_exit<A: Into<Cow<'static, str>>>(
        &mut self,
        arguments: impl IntoIterator<Item = A>,
    ) -> Evaluation {
        let result = self.evaluate(arguments);
        match self.conclude(result) {
            Ok(evaluation) => evaluation,
            Err(Exit { code }) => process::exit(code),
        }
    }

    pub fn run(&mut self) -> Evaluation {
        self.evaluate_or_exit(env::args().skip(1))
    }

    fn report(&self, error: &Error) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        self.style.begin(Item::Usage, &mut buffer)?;
        write!(buffer, "{}", self.usage())?;
        self.style.end(Item::Usage, &mut buffer)?;
        writeln!(buffer)?;
        self.style.begin(Item::Error, &mut buffer)?;
        write!(buffer, "{error}")?;
        self.style.end(Item::Error, &mut buffer)?;
        writeln!(buffer)?;
        Ok(buffer)
    }
}

fn program() -> Cow<'static, str> {
    env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| Cow::Owned(name.to_string_lossy().into_owned()))
        .unwrap_or(Cow::Borrowed(env!("CARGO_PKG_NAME")))
}
