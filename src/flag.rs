use crate::{
    coerce::{Coercer, Value},
    error::Error,
    node::{describe, Node},
};
use std::borrow::Cow;

pub const SHORT: &str = "-";
pub const LONG: &str = "--";

/// A named option bound to a short flag (`-a`), a long flag (`--all`) or both.
///
/// Both forms address the same record, so `-a` and `--all` update the same
/// value. A flag with the [`Coercer::Boolean`] coercer takes no value and
/// flips its default when present.
#[derive(Debug, Clone)]
pub struct Flag {
    pub(crate) node: Node,
    short: Option<char>,
    long: Option<Cow<'static, str>>,
    default: Option<Value>,
    coercer: Coercer,
}

describe!(Flag);

impl Flag {
    /// Fails with [`Error::MissingFlagName`] when neither name is given.
    pub fn new(
        short: Option<char>,
        long: Option<impl Into<Cow<'static, str>>>,
    ) -> Result<Self, Error> {
        let long = long.map(Into::into);
        if let Some(short) = short {
            if short == '-' || short.is_whitespace() {
                return Err(Error::InvalidShortName(short));
            }
        }
        if let Some(long) = &long {
            if long.chars().count() < 2 || long.starts_with(SHORT) || long.contains(char::is_whitespace) {
                return Err(Error::InvalidLongName(long.clone()));
            }
        }
        if short.is_none() && long.is_none() {
            return Err(Error::MissingFlagName);
        }
        Ok(Self {
            node: Node::new(),
            short,
            long,
            default: None,
            coercer: Coercer::Text,
        })
    }

    pub fn short(short: char) -> Result<Self, Error> {
        Self::new(Some(short), None::<&'static str>)
    }

    pub fn long(long: impl Into<Cow<'static, str>>) -> Result<Self, Error> {
        Self::new(None, Some(long))
    }

    pub fn both(short: char, long: impl Into<Cow<'static, str>>) -> Result<Self, Error> {
        Self::new(Some(short), Some(long))
    }

    /// Switches to the boolean coercer; an unset default becomes `false`.
    pub fn boolean(self) -> Self {
        self.coercer(Coercer::Boolean)
    }

    pub fn integer(self) -> Self {
        self.coercer(Coercer::Integer)
    }

    pub fn float(self) -> Self {
        self.coercer(Coercer::Float)
    }

    pub fn decimal(self) -> Self {
        self.coercer(Coercer::Decimal)
    }

    pub fn multiple(self) -> Self {
        self.coercer(Coercer::Multiple)
    }

    /// Switches the coercer and re-adopts the current default through it.
    /// A default the new coercer cannot adopt is dropped.
    pub fn coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self.default = self
            .default
            .take()
            .and_then(|value| coercer.adopt(value).ok());
        if coercer.toggles() && self.default.is_none() {
            self.default = Some(Value::Boolean(false));
        }
        self
    }

    /// Sets the default, adopted through the current coercer like
    /// [`Flag::set_default`].
    pub fn default(mut self, value: impl Into<Value>) -> Result<Self, Error> {
        self.set_default(value.into())?;
        Ok(self)
    }

    #[inline]
    pub const fn short_name(&self) -> Option<char> {
        self.short
    }

    #[inline]
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    #[inline]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    pub const fn coercion(&self) -> Coercer {
        self.coercer
    }

    /// Replaces the default, adopting the value through this flag's coercer.
    pub fn set_default(&mut self, value: Value) -> Result<(), Error> {
        let value = self.adopt(value)?;
        self.replace_default(value);
        Ok(())
    }

    pub(crate) fn adopt(&self, value: Value) -> Result<Value, Error> {
        self.coercer.adopt(value).map_err(|error| self.target(error))
    }

    /// Expects a value already adopted through this flag's coercer.
    pub(crate) fn replace_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    /// The value this flag contributes when present on the command line.
    pub(crate) fn toggled(&self) -> Value {
        match self.default {
            Some(Value::Boolean(value)) => Value::Boolean(!value),
            _ => Value::Boolean(true),
        }
    }

    pub(crate) fn coerce(&self, raw: &str) -> Result<Value, Error> {
        self.coercer.coerce(raw).map_err(|error| self.target(error))
    }

    /// Every spelling of this flag, as typed on the command line.
    pub fn spellings(&self) -> impl Iterator<Item = String> + '_ {
        self.short
            .map(|short| format!("{SHORT}{short}"))
            .into_iter()
            .chain(self.long.as_ref().map(|long| format!("{LONG}{long}")))
    }

    fn target(&self, error: Error) -> Error {
        match error {
            Error::Conversion(value, type_name, None) => {
                let label = self.spellings().next().unwrap_or_default();
                Error::Conversion(value, type_name, Some(Cow::Owned(label)))
            }
            error => error,
        }
    }
}
