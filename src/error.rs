use core::fmt;
use std::{borrow::Cow, error, io, mem::replace};

#[derive(Clone, PartialEq)]
pub enum Error {
    Help(Option<String>),

    MissingFlagName,
    InvalidShortName(char),
    InvalidLongName(Cow<'static, str>),

    UnknownOption(Cow<'static, str>, Vec<Cow<'static, str>>),
    AmbiguousOption(Cow<'static, str>, Vec<Cow<'static, str>>),
    UnknownCommand(Cow<'static, str>, Vec<Cow<'static, str>>),
    AmbiguousCommand(Cow<'static, str>, Vec<Cow<'static, str>>),
    MissingOptionValue(Cow<'static, str>),
    Conversion(Cow<'static, str>, &'static str, Option<Cow<'static, str>>),

    Format(fmt::Error),
    Io(String),
    Json(String),
    Other(Cow<'static, str>),
}

impl Error {
    /// The offending token of an evaluation failure, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Error::UnknownOption(token, _)
            | Error::AmbiguousOption(token, _)
            | Error::UnknownCommand(token, _)
            | Error::AmbiguousCommand(token, _)
            | Error::MissingOptionValue(token)
            | Error::Conversion(token, _, _) => Some(token),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[Cow<'static, str>] {
        match self {
            Error::UnknownOption(_, candidates)
            | Error::AmbiguousOption(_, candidates)
            | Error::UnknownCommand(_, candidates)
            | Error::AmbiguousCommand(_, candidates) => candidates,
            _ => &[],
        }
    }
}

impl error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Help(Some(help)) => write!(f, "{help}")?,
            Error::Help(None) => write!(f, "Missing help.")?,

            Error::MissingFlagName => write!(f, "An option requires a short name, a long name or both.")?,
            Error::InvalidShortName(name) => write!(f, "Invalid short name '{name}'. A valid short name is a single character other than '-'.")?,
            Error::InvalidLongName(name) => write!(f, "Invalid long name '{name}'. A valid long name has at least two characters and does not start with '-'.")?,

            Error::UnknownOption(token, suggestions) => {
                write!(f, "option \"{token}\" does not exist")?;
                write_join(f, ", did you mean?\n    ", "", "\n    ", suggestions)?;
            }
            Error::AmbiguousOption(token, candidates) => {
                write!(f, "option \"{token}\" does not exist")?;
                write_join(f, ", did you mean?\n    ", "", "\n    ", candidates)?;
            }
            Error::UnknownCommand(token, suggestions) => {
                write!(f, "command \"{token}\" does not exist")?;
                write_join(f, ", did you mean?\n    ", "", "\n    ", suggestions)?;
            }
            Error::AmbiguousCommand(token, candidates) => {
                write!(f, "command \"{token}\" does not exist")?;
                write_join(f, ", did you mean?\n    ", "", "\n    ", candidates)?;
            }
            Error::MissingOptionValue(option) => write!(f, "option \"{option}\" requires a value")?,
            Error::Conversion(value, type_name, target) => {
                write!(f, "cannot convert \"{value}\" to {type_name}")?;
                write_join(f, " for \"", "\"", "", target)?;
            }

            Error::Format(error) => error.fmt(f)?,
            Error::Io(error) => error.fmt(f)?,
            Error::Json(error) => error.fmt(f)?,
            Error::Other(error) => error.fmt(f)?,
        }
        Ok(())
    }
}

impl From<fmt::Error> for Error {
    fn from(error: fmt::Error) -> Self {
        Error::Format(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error.to_string())
    }
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Error::from(Cow::Borrowed(value))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::from(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Error {
    fn from(value: Cow<'static, str>) -> Self {
        Error::Other(value)
    }
}

fn write_join(
    formatter: &mut fmt::Formatter,
    prefix: impl fmt::Display,
    suffix: impl fmt::Display,
    separator: impl fmt::Display,
    items: impl IntoIterator<Item = impl fmt::Display>,
) -> Result<(), fmt::Error> {
    let mut has = false;
    for item in items.into_iter() {
        if replace(&mut has, true) {
            write!(formatter, "{separator}")?;
        } else {
            write!(formatter, "{prefix}")?;
        }
        write!(formatter, "{item}")?;
    }
    if has {
        write!(formatter, "{suffix}")?;
    }
    Ok(())
}
