use crate::{command::Command, style::Item, style::Style};
use std::{
    fmt::{self, Write},
    mem::replace,
};

const USAGE: &str = "usage:";
const OPTIONS: &str = "[options]";
const COMMANDS: &str = "[commands]";

struct Helper<'a> {
    buffer: &'a mut String,
    style: &'a dyn Style,
    indent: usize,
}

impl<'a> Helper<'a> {
    fn space(&mut self, width: usize) -> fmt::Result {
        for _ in 0..width {
            write!(self.buffer, " ")?;
        }
        Ok(())
    }

    fn styled(&mut self, item: Item, value: &str) -> fmt::Result {
        self.style.begin(item, self.buffer)?;
        write!(self.buffer, "{value}")?;
        self.style.end(item, self.buffer)
    }

    /// Writes words up to the style's width, continuing lines at `indent`.
    fn wrap(&mut self, value: &str, indent: usize) -> fmt::Result {
        let width = self.style.width().max(indent + 1);
        let mut cursor = indent;
        let mut join = false;
        for word in value.split_whitespace() {
            let length = word.chars().count();
            if join && cursor + 1 + length > width {
                writeln!(self.buffer)?;
                self.space(indent)?;
                cursor = indent;
            } else if replace(&mut join, true) {
                write!(self.buffer, " ")?;
                cursor += 1;
            }
            write!(self.buffer, "{word}")?;
            cursor += length;
        }
        Ok(())
    }

    fn section<'b>(
        &mut self,
        head: &str,
        item: Item,
        rows: impl IntoIterator<Item = (String, &'b str)>,
        names: usize,
    ) -> fmt::Result {
        let mut rows = rows.into_iter().peekable();
        if rows.peek().is_none() {
            return Ok(());
        }

        writeln!(self.buffer)?;
        self.styled(Item::Head, head)?;
        writeln!(self.buffer)?;
        let indent = self.indent + names + self.style.indent();
        for (name, help) in rows {
            self.space(self.indent)?;
            self.styled(item, &name)?;
            self.space(indent.saturating_sub(self.indent + name.chars().count()))?;
            self.style.begin(Item::Help, self.buffer)?;
            self.wrap(help, indent)?;
            self.style.end(Item::Help, self.buffer)?;
            writeln!(self.buffer)?;
        }
        Ok(())
    }
}

/// `usage: program command [options] [commands] positional...`
pub(crate) fn usage(command: &Command, program: &str, path: &[&str]) -> String {
    let mut words = vec![USAGE, program];
    words.extend(path.iter().copied());
    if !command.options.is_empty() {
        words.push(OPTIONS);
    }
    if !command.commands.is_empty() {
        words.push(COMMANDS);
    }
    words.extend(command.positionals.iter().map(|positional| positional.name()));
    words.retain(|word| !word.is_empty());
    words.join(" ")
}

pub(crate) fn help(
    command: &Command,
    program: &str,
    path: &[&str],
    style: &dyn Style,
) -> Result<String, fmt::Error> {
    let mut buffer = String::new();
    let mut helper = Helper {
        buffer: &mut buffer,
        style,
        indent: style.indent(),
    };

    helper.styled(Item::Usage, &usage(command, program, path))?;
    writeln!(helper.buffer)?;
    if command.is_described() {
        writeln!(helper.buffer)?;
        helper.style.begin(Item::Description, helper.buffer)?;
        helper.wrap(command.long_description(), 0)?;
        helper.style.end(Item::Description, helper.buffer)?;
        writeln!(helper.buffer)?;
    }

    let commands = command
        .commands
        .iter()
        .map(|(name, command)| (name.clone(), command.short_description()))
        .collect::<Vec<_>>();
    let options = command
        .options
        .values()
        .map(|flag| (flag.spellings().collect::<Vec<_>>().join(" "), flag.short_description()))
        .collect::<Vec<_>>();
    let positionals = command
        .positionals
        .iter()
        .map(|positional| (positional.name().to_owned(), positional.short_description()))
        .collect::<Vec<_>>();
    let names = commands
        .iter()
        .chain(&options)
        .chain(&positionals)
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    helper.section("Commands:", Item::Command, commands, names)?;
    helper.section("Options:", Item::Option, options, names)?;
    helper.section("Positional arguments:", Item::Positional, positionals, names)?;
    Ok(buffer)
}
