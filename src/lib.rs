pub mod ast;
pub mod builtins;
mod environment;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod token;

pub use environment::Environment;
pub use evaluator::{eval, eval_with_output};
pub use lexer::Lexer;
pub use object::Object;
pub use parser::{parse, ParseError, Parser};
pub use runner::{run_file, RunError};
pub use token::{Token, TokenSource};
