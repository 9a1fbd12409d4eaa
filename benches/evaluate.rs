use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opts::{style::Plain, Command, Flag, Parser, Positional};

fn parser() -> Parser {
    let stash = Command::new()
        .option("message", Flag::both('m', "message").unwrap())
        .option("keep-index", Flag::both('k', "keep-index").unwrap().boolean())
        .positional(Positional::new("pathspec").multiple());
    Parser::new()
        .name("git")
        .style(Plain)
        .option("verbose", Flag::both('v', "verbose").unwrap().boolean())
        .option("jobs", Flag::both('j', "jobs").unwrap().integer())
        .command("stash", stash)
        .command("stack", Command::new())
        .command("status", Command::new())
}

fn evaluate(criterion: &mut Criterion) {
    let parser = parser();
    criterion.bench_function("flags", |bencher| {
        bencher.iter(|| parser.evaluate(black_box(["-v", "--jobs", "8"])))
    });
    criterion.bench_function("abbreviated", |bencher| {
        bencher.iter(|| parser.evaluate(black_box(["--verb", "stas", "--keep", "-m", "wip", "a,b"])))
    });
    criterion.bench_function("unknown", |bencher| {
        bencher.iter(|| parser.evaluate(black_box(["--verbsoe"])))
    });
    criterion.bench_function("help", |bencher| {
        bencher.iter(|| parser.evaluate(black_box(["stash", "help"])))
    });
}

criterion_group!(benches, evaluate);
criterion_main!(benches);
