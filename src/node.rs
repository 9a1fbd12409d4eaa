use std::borrow::Cow;

pub const NO_SHORT_DESCRIPTION: &str = "No short description.";
pub const NO_LONG_DESCRIPTION: &str = "No long description.";

/// Descriptive text shared by every element of a command tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    short: Option<Cow<'static, str>>,
    long: Option<Cow<'static, str>>,
}

impl Node {
    pub const fn new() -> Self {
        Self {
            short: None,
            long: None,
        }
    }

    pub fn short_description(&self) -> &str {
        self.short.as_deref().unwrap_or(NO_SHORT_DESCRIPTION)
    }

    /// Falls back to the short description, then to a sentinel.
    pub fn long_description(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or(NO_LONG_DESCRIPTION)
    }

    pub fn set_short_description(&mut self, description: impl Into<Cow<'static, str>>) {
        self.short = Some(description.into());
    }

    pub fn set_long_description(&mut self, description: impl Into<Cow<'static, str>>) {
        self.long = Some(description.into());
    }

    #[inline]
    pub const fn is_described(&self) -> bool {
        self.short.is_some() || self.long.is_some()
    }
}

macro_rules! describe {
    ($type: ty) => {
        impl core::ops::Deref for $type {
            type Target = crate::node::Node;
            fn deref(&self) -> &Self::Target {
                &self.node
            }
        }

        impl core::ops::DerefMut for $type {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.node
            }
        }

        impl $type {
            pub fn with_short_description(
                mut self,
                description: impl Into<std::borrow::Cow<'static, str>>,
            ) -> Self {
                self.node.set_short_description(description);
                self
            }

            pub fn with_long_description(
                mut self,
                description: impl Into<std::borrow::Cow<'static, str>>,
            ) -> Self {
                self.node.set_long_description(description);
                self
            }
        }
    };
}

pub(crate) use describe;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_description_fallback() {
        assert_eq!(Node::new().short_description(), "No short description.");
    }

    #[test]
    fn long_description_fallback() {
        assert_eq!(Node::new().long_description(), "No long description.");
    }

    #[test]
    fn long_description_falls_back_to_short() {
        let mut node = Node::new();
        node.set_short_description("Foobar");
        assert_eq!(node.long_description(), "Foobar");
        node.set_long_description("Foobar, at length.");
        assert_eq!(node.long_description(), "Foobar, at length.");
        assert_eq!(node.short_description(), "Foobar");
    }
}
