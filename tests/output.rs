use opts::{style::Plain, Command, Error, Exit, Flag, Parser, Positional};
use std::{
    cell::RefCell,
    error,
    io::{self, Write},
    rc::Rc,
    result,
};

type Result = result::Result<(), Box<dyn error::Error>>;

#[derive(Clone, Default)]
struct Buffer(Rc<RefCell<Vec<u8>>>);

impl Buffer {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Buffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn parser(buffer: &Buffer) -> Parser {
    Parser::new().name("script").style(Plain).out(buffer.clone())
}

fn conclude(parser: &mut Parser, arguments: &[&'static str]) -> Option<i32> {
    let result = parser.evaluate(arguments.iter().copied());
    parser.conclude(result).err().map(|Exit { code }| code)
}

fn assert_contains(output: &str, items: &[&str]) {
    for item in items {
        assert!(output.contains(item), "{item:?} not in {output:?}");
    }
}

#[test]
fn ambiguous_commands_suggest_candidates() -> Result {
    for token in ["s", "st", "sta"] {
        let buffer = Buffer::default();
        let mut parser = parser(&buffer)
            .takes_arguments(false)
            .command("stack", Command::new())
            .command("stash", Command::new());
        assert_eq!(conclude(&mut parser, &[token]), Some(2));
        assert_contains(
            &buffer.text(),
            &[
                "usage: script [commands]",
                &format!("command \"{token}\" does not exist, did you mean?"),
                "stack",
                "stash",
            ],
        );
    }
    Ok(())
}

#[test]
fn ambiguous_options_suggest_candidates() -> Result {
    for token in ["--s", "--st", "--sta"] {
        let buffer = Buffer::default();
        let mut parser = parser(&buffer)
            .option("stack", Flag::long("stack")?)
            .option("stash", Flag::long("stash")?);
        assert_eq!(conclude(&mut parser, &[token]), Some(2));
        assert_contains(
            &buffer.text(),
            &[
                "usage: script [options]",
                &format!("option \"{token}\" does not exist, did you mean?"),
                "--stack",
                "--stash",
            ],
        );
    }
    Ok(())
}

#[test]
fn nonexisting_command() {
    let buffer = Buffer::default();
    let mut parser = parser(&buffer).takes_arguments(false);
    assert_eq!(conclude(&mut parser, &["foo"]), Some(2));
    assert_contains(&buffer.text(), &["usage: script", "command \"foo\" does not exist"]);
}

#[test]
fn nonexisting_options() {
    for token in ["--foo", "-f"] {
        let buffer = Buffer::default();
        let mut parser = parser(&buffer);
        assert_eq!(conclude(&mut parser, &[token]), Some(2));
        assert_contains(
            &buffer.text(),
            &["usage: script", &format!("option \"{token}\" does not exist")],
        );
    }
}

#[test]
fn success_writes_nothing() -> Result {
    let buffer = Buffer::default();
    let mut parser = parser(&buffer).option("f", Flag::short('f')?.boolean());
    let result = parser.evaluate(["-f"]);
    assert!(parser.conclude(result).is_ok());
    assert!(buffer.text().is_empty());
    Ok(())
}

#[test]
fn help_lists_commands() {
    let buffer = Buffer::default();
    let mut parser = parser(&buffer)
        .description("The script description")
        .command("foo", Command::new().with_short_description("foo description"))
        .command("bar", Command::new().with_short_description("bar description"));
    assert_eq!(conclude(&mut parser, &["help"]), Some(0));
    assert_contains(
        &buffer.text(),
        &[
            "usage: script [commands]",
            parser.long_description(),
            "Commands:",
            " foo",
            parser.commands["foo"].short_description(),
            " bar",
            parser.commands["bar"].short_description(),
        ],
    );
}

#[test]
fn help_lists_options() -> Result {
    let buffer = Buffer::default();
    let mut parser = parser(&buffer)
        .option("foo", Flag::short('f')?)
        .option("bar", Flag::long("bar")?)
        .option("baz", Flag::both('b', "baz")?);
    assert_eq!(conclude(&mut parser, &["help"]), Some(0));
    assert_contains(
        &buffer.text(),
        &["usage: script [options]", "Options:", " -f", " --bar", " -b --baz"],
    );
    Ok(())
}

#[test]
fn help_lists_positionals() {
    let buffer = Buffer::default();
    let mut parser = parser(&buffer)
        .positional(Positional::new("foo"))
        .positional(Positional::new("bar").with_short_description("something"));
    assert_eq!(conclude(&mut parser, &["help"]), Some(0));
    assert_contains(
        &buffer.text(),
        &[
            "usage: script foo bar",
            "Positional arguments:",
            " foo",
            "No short description.",
            " bar",
            "something",
        ],
    );
}

#[test]
fn help_for_a_nested_command() -> Result {
    let buffer = Buffer::default();
    let remote = Command::new()
        .with_long_description("Manage the set of tracked repositories.")
        .option("verbose", Flag::both('v', "verbose")?.boolean())
        .positional(Positional::new("name"));
    let mut parser = parser(&buffer).command("remote", remote);
    assert_eq!(conclude(&mut parser, &["rem", "help"]), Some(0));
    assert_contains(
        &buffer.text(),
        &[
            "usage: script remote [options] name",
            "Manage the set of tracked repositories.",
            " -v --verbose",
        ],
    );
    Ok(())
}

#[test]
fn help_is_not_an_error_value() {
    let parser = Parser::new().name("script").style(Plain);
    match parser.evaluate(["help"]) {
        Err(Error::Help(Some(help))) => assert!(help.starts_with("usage: script")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn declared_help_command_takes_precedence() -> Result {
    let parser = Parser::new().command("help", Command::new());
    assert!(parser.evaluate(["help"])?.command("help").is_some());
    Ok(())
}

#[test]
fn usage_lines() -> Result {
    let cases = [
        (Parser::new().command("foo", Command::new()), "usage: script [commands]"),
        (Parser::new().option("foo", Flag::short('f')?), "usage: script [options]"),
        (
            Parser::new()
                .option("foo", Flag::short('f')?)
                .command("bar", Command::new()),
            "usage: script [options] [commands]",
        ),
        (
            Parser::new()
                .positional(Positional::new("a"))
                .positional(Positional::new("b")),
            "usage: script a b",
        ),
        (
            Parser::new()
                .option("foo", Flag::short('f')?)
                .command("bar", Command::new())
                .positional(Positional::new("baz")),
            "usage: script [options] [commands] baz",
        ),
    ];
    for (parser, usage) in cases {
        let buffer = Buffer::default();
        let mut parser = parser.name("script").style(Plain).out(buffer.clone());
        assert_eq!(parser.usage(), usage);
        assert_eq!(conclude(&mut parser, &["help"]), Some(0));
        assert_contains(&buffer.text(), &[usage]);
    }
    Ok(())
}
