use crate::{
    coerce::{Coercer, Value},
    error::Error,
    node::{describe, Node},
};
use std::borrow::Cow;

/// An order-matched argument; its name only appears in help and usage.
#[derive(Debug, Clone)]
pub struct Positional {
    pub(crate) node: Node,
    name: Cow<'static, str>,
    coercer: Coercer,
}

describe!(Positional);

impl Positional {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            node: Node::new(),
            name: name.into(),
            coercer: Coercer::Text,
        }
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

    pub fn coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn coercion(&self) -> Coercer {
        self.coercer
    }

    pub(crate) fn coerce(&self, raw: &str) -> Result<Value, Error> {
        self.coercer.coerce(raw).map_err(|error| match error {
            Error::Conversion(value, type_name, None) => {
                Error::Conversion(value, type_name, Some(self.name.clone()))
            }
            error => error,
        })
    }
}
