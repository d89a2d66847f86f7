use monkey_walker::repl::{self, Mode};
use monkey_walker::run_file;
use std::env;
use std::io;
use std::process;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Quiet unless RUST_LOG asks for something; stdout belongs to the program.
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();

    let stdout = io::stdout();
    let mut output = stdout.lock();

    if let Some(path) = env::args().nth(1) {
        if let Err(err) = run_file(&path, &mut output) {
            eprintln!("{}", err);
            process::exit(1);
        }
        return;
    }

    let mode = if env::var("MONKEY_TOKENS").is_ok() {
        Mode::Tokens
    } else {
        Mode::Eval
    };

    println!("Hello! This is the Monkey programming language!");
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    if let Err(err) = repl::start(stdin.lock(), &mut output, mode) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
