use self::color::*;
use std::fmt::{self, Write};
use termion::{
    color::Fg,
    style::{Bold, Italic, Reset, Underline},
};

/// No escape sequences; fixed width.
pub struct Plain;
/// Terminal colors; width follows the terminal.
pub struct Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Item {
    Usage,
    Description,
    Head,
    Command,
    Option,
    Positional,
    Help,
    Error,
}

pub trait Style {
    fn indent(&self) -> usize;
    fn width(&self) -> usize;
    fn begin(&self, item: Item, buffer: &mut String) -> fmt::Result;
    fn end(&self, item: Item, buffer: &mut String) -> fmt::Result;
}

impl Style for Plain {
    #[inline]
    fn indent(&self) -> usize {
        2
    }

    #[inline]
    fn width(&self) -> usize {
        96
    }

    #[inline]
    fn begin(&self, _: Item, _: &mut String) -> fmt::Result {
        Ok(())
    }

    #[inline]
    fn end(&self, _: Item, _: &mut String) -> fmt::Result {
        Ok(())
    }
}

impl Style for Color {
    #[inline]
    fn indent(&self) -> usize {
        2
    }

    fn width(&self) -> usize {
        term_size::dimensions().map_or(96, |(width, _)| width.saturating_sub(4).clamp(40, 120))
    }

    fn begin(&self, item: Item, buffer: &mut String) -> fmt::Result {
        match item {
            Item::Usage => write!(buffer, "{Underline}{}", Fg(VIOLET)),
            Item::Description => write!(buffer, "{}", Fg(SALMON_PINK)),
            Item::Head => write!(buffer, "{Bold}{}", Fg(OCEAN_BLUE)),
            Item::Command => write!(buffer, "{Bold}{}", Fg(TURQUOISE)),
            Item::Option => write!(buffer, "{}", Fg(TURQUOISE)),
            Item::Positional => write!(buffer, "{Italic}{}", Fg(TURQUOISE)),
            Item::Help => write!(buffer, "{}", Fg(PEACH)),
            Item::Error => write!(buffer, "{Bold}{}", Fg(RUBY_RED)),
        }
    }

    #[inline]
    fn end(&self, _: Item, buffer: &mut String) -> fmt::Result {
        write!(buffer, "{Reset}")
    }
}

pub mod color {
    use termion::color::Rgb;

    pub const OCEAN_BLUE: Rgb = Rgb(36, 113, 163);
    pub const TURQUOISE: Rgb = Rgb(64, 224, 208);
    pub const RUBY_RED: Rgb = Rgb(220, 20, 60);
    pub const VIOLET: Rgb = Rgb(238, 130, 238);
    pub const PEACH: Rgb = Rgb(255, 218, 185);
    pub const SALMON_PINK: Rgb = Rgb(255, 145, 164);
}
