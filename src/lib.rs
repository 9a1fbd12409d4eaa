//! A declarative command-line argument parser.
//!
//! Describe a tree of options ([`Flag`]), [`Positional`] arguments and nested
//! [`Command`]s, then evaluate an argument vector against it:
//!
//! ```
//! use opts::{Command, Error, Evaluation, Flag, Parser, Value};
//!
//! let parser = Parser::new()
//!     .name("git")
//!     .option("verbose", Flag::both('v', "verbose")?.boolean())
//!     .command(
//!         "stash",
//!         Command::new().option("message", Flag::both('m', "message")?),
//!     );
//!
//! // `--verb` and `sta` are unique abbreviations.
//! let evaluation = parser.evaluate(["--verb", "sta", "-m", "wip", "extra"])?;
//! assert_eq!(evaluation.get("verbose"), Some(&Value::Boolean(true)));
//! assert_eq!(
//!     evaluation.command("stash"),
//!     Some(&Evaluation::new([("message", "wip".into())], ["extra".into()]))
//! );
//! # Ok::<(), Error>(())
//! ```

mod case;
mod coerce;
mod command;
mod defaults;
mod error;
mod flag;
mod help;
mod matcher;
mod node;
mod parse;
mod parser;
mod positional;
mod spell;
pub mod style;

pub use crate::{
    case::Case,
    coerce::{Coercer, Value},
    command::{Command, Declare},
    defaults::{Defaults, Entry},
    error::Error,
    flag::Flag,
    matcher::{resolve, Match},
    node::Node,
    parse::Evaluation,
    parser::{Exit, Parser},
    positional::Positional,
    style::Style,
};

/// Requests help wherever a command name may appear.
pub const HELP: &str = "help";

/// Names a [`Parser`] after the running crate's package metadata.
#[macro_export]
macro_rules! cargo {
    () => {
        |parser: $crate::Parser| {
            parser
                .name(env!("CARGO_PKG_NAME").trim())
                .description(env!("CARGO_PKG_DESCRIPTION").trim())
        }
    };
}
