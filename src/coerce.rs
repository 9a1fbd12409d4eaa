use crate::{error::Error, parse::Evaluation};
use core::fmt;
use bigdecimal::BigDecimal;
use std::{borrow::Cow, str::FromStr};

const QUOTE: char = '"';
const SEPARATOR: char = ',';

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Decimal(BigDecimal),
    Text(String),
    List(Vec<String>),
    Command(Evaluation),
}

/// Converts a raw token into a [`Value`].
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum Coercer {
    /// Takes no token; the flag flips its default.
    Boolean,
    #[default]
    Text,
    Integer,
    Float,
    Decimal,
    /// Comma separated values; commas inside double quotes do not split.
    Multiple,
    Other(&'static str, fn(&str) -> Option<Value>),
}

impl Coercer {
    #[inline]
    pub const fn toggles(&self) -> bool {
        matches!(self, Coercer::Boolean)
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Coercer::Boolean => "boolean",
            Coercer::Text => "text",
            Coercer::Integer => "integer",
            Coercer::Float => "float",
            Coercer::Decimal => "decimal",
            Coercer::Multiple => "list",
            Coercer::Other(name, _) => *name,
        }
    }

    pub fn coerce(&self, raw: &str) -> Result<Value, Error> {
        let value = match self {
            Coercer::Boolean => parse(raw).map(Value::Boolean),
            Coercer::Text => Some(Value::Text(raw.to_owned())),
            Coercer::Integer => parse(raw).map(Value::Integer),
            Coercer::Float => parse(raw).map(Value::Float),
            Coercer::Decimal => parse(raw).map(Value::Decimal),
            Coercer::Multiple => split(raw).map(Value::List),
            Coercer::Other(_, coerce) => coerce(raw),
        };
        value.ok_or_else(|| self.failed(raw))
    }

    /// Accepts a value that did not come from a token, such as a seeded default.
    pub fn adopt(&self, value: Value) -> Result<Value, Error> {
        match (self, value) {
            (Coercer::Text, value @ Value::Text(_)) => Ok(value),
            (_, Value::Text(raw)) => self.coerce(&raw),
            (Coercer::Boolean, value @ Value::Boolean(_))
            | (Coercer::Integer, value @ Value::Integer(_))
            | (Coercer::Float, value @ Value::Float(_))
            | (Coercer::Decimal, value @ Value::Decimal(_))
            | (Coercer::Multiple, value @ Value::List(_)) => Ok(value),
            (Coercer::Float, Value::Integer(value)) => Ok(Value::Float(value as f64)),
            (Coercer::Decimal, Value::Integer(value)) => Ok(Value::Decimal(BigDecimal::from(value))),
            (Coercer::Decimal, Value::Float(value)) => self.coerce(&value.to_string()),
            (Coercer::Text, value) => Ok(Value::Text(value.to_string())),
            (Coercer::Other(_, coerce), value) => {
                let raw = value.to_string();
                coerce(&raw).ok_or_else(|| self.failed(&raw))
            }
            (_, value) => Err(self.failed(&value.to_string())),
        }
    }

    fn failed(&self, raw: &str) -> Error {
        Error::Conversion(Cow::Owned(raw.to_owned()), self.type_name(), None)
    }
}

impl fmt::Debug for Coercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coercer({})", self.type_name())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Decimal(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::List(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, "{SEPARATOR}")?;
                    }
                    if value.contains(SEPARATOR) {
                        write!(f, "{QUOTE}{value}{QUOTE}")?;
                    } else {
                        write!(f, "{value}")?;
                    }
                }
                Ok(())
            }
            Value::Command(_) => write!(f, "<command>"),
        }
    }
}

macro_rules! from {
    ($type: ty, $variant: ident) => {
        impl From<$type> for Value {
            #[inline]
            fn from(value: $type) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

from!(bool, Boolean);
from!(i64, Integer);
from!(i32, Integer);
from!(f64, Float);
from!(BigDecimal, Decimal);
from!(String, Text);
from!(&str, Text);
from!(Vec<String>, List);
from!(Evaluation, Command);

fn parse<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

/// Splits on commas outside of double quotes and strips the quotes.
/// `None` when a quote is left open.
pub(crate) fn split(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for letter in raw.chars() {
        match letter {
            QUOTE => quoted = !quoted,
            SEPARATOR if !quoted => values.push(std::mem::take(&mut current)),
            letter => current.push(letter),
        }
    }
    if quoted {
        return None;
    }
    values.push(current);
    Some(values)
}
