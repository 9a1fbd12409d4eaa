use opts::{cargo, Command, Declare, Defaults, Error, Flag, Node, Parser, Positional, Value};
use std::{env, fs, process};
use tracing::{error, info};

struct Stash;

impl Declare for Stash {
    fn options() -> Result<Vec<(&'static str, Flag)>, Error> {
        Ok(vec![
            (
                "verbose",
                Flag::both('v', "verbose")?
                    .boolean()
                    .with_short_description("Report every step."),
            ),
            (
                "config",
                Flag::long("config")?.with_short_description("Read defaults from a JSON file."),
            ),
        ])
    }

    fn commands() -> Result<Vec<(&'static str, Command)>, Error> {
        let push = Command::new()
            .with_short_description("Save local modifications to a new stash entry.")
            .option(
                "message",
                Flag::both('m', "message")?.with_short_description("Describe the entry."),
            )
            .option(
                "keep-index",
                Flag::both('k', "keep-index")?
                    .boolean()
                    .with_short_description("Leave staged changes in place."),
            )
            .positional(
                Positional::new("pathspec")
                    .multiple()
                    .with_short_description("Comma separated paths to stash."),
            );
        let pop = Command::new()
            .with_short_description("Apply a stash entry and remove it from the list.")
            .positional(Positional::new("entry").integer());
        let list = Command::new()
            .with_short_description("List the stash entries.")
            .accept_arguments(false)
            .option("limit", Flag::long("limit")?.integer().default(10i64)?);
        Ok(vec![("push", push), ("pop", pop), ("list", list)])
    }

    fn describe(node: &mut Node) {
        node.set_short_description("Stash changes away.");
    }
}

fn parser() -> Result<Parser, Error> {
    let mut parser = Parser::declare::<Stash>()?.pipe(cargo!()).name("stash");
    let mut defaults = Defaults::from_environment(&parser, "stash", env::vars());
    if let Some(path) = config() {
        defaults = Defaults::from_json(&fs::read_to_string(path)?)?.merge(defaults);
    }
    parser.apply_defaults(&defaults)?;
    Ok(parser)
}

/// `--config` is needed before evaluation, so it is peeked from the raw arguments.
fn config() -> Option<String> {
    let mut arguments = env::args().skip_while(|argument| argument != "--config");
    arguments.next()?;
    arguments.next()
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut parser = match parser() {
        Ok(parser) => parser,
        Err(error) => {
            error!(%error, "Invalid declaration.");
            process::exit(2);
        }
    };
    let evaluation = parser.run();
    let verbose = evaluation.get("verbose") == Some(&Value::Boolean(true));
    for (name, value) in &evaluation.values {
        match value {
            Value::Command(nested) => {
                info!(command = %name, values = ?nested.values, leftover = ?nested.leftover, "Invoked.")
            }
            value if verbose => info!(option = %name, %value, "Set."),
            _ => {}
        }
    }
}
