use monkey_walker::{eval, Environment, Lexer, Parser};
use std::env;
use std::process;
use std::time::Instant;

static FIBONACCI: &str = "let fibonacci = fn(x) {
if (x == 0) { 0
     } else {
       if (x == 1) {
         return 1;
       } else {
         fibonacci(x - 1) + fibonacci(x - 2);
       }
} };";

fn main() {
    let n: u32 = match env::args().nth(1).map(|arg| arg.parse()) {
        None => 25,
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            eprintln!("invalid argument: {}", err);
            process::exit(1);
        }
    };

    let input = format!("{}\nfibonacci({});", FIBONACCI, n);
    let program = match Parser::new(Lexer::new(input)).parse_program() {
        Ok(program) => program,
        Err(errors) => {
            for err in errors.iter() {
                eprintln!("\t{}", err);
            }
            process::exit(1);
        }
    };

    let env = Environment::new();
    let start = Instant::now();
    let result = eval((&program).into(), &env);
    let duration = start.elapsed();

    println!(
        "engine=eval, n={}, result={}, duration={}",
        n,
        result,
        duration.as_secs_f64(),
    );
}
