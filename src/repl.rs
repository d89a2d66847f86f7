use crate::environment::Environment;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::TokenType;
use std::io::{self, BufRead, Write};

static PROMPT: &str = ">> ";

/// What the shell does with each line it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Eval,
    Tokens,
}

/// Runs the shell until `input` is exhausted.
///
/// Bindings persist across lines. Results are printed in their inspect form,
/// except null, which prints nothing.
pub fn start<R: BufRead, W: Write>(input: R, output: &mut W, mode: Mode) -> io::Result<()> {
    let env = Environment::new();
    tracing::debug!(?mode, "starting shell");

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        match mode {
            Mode::Eval => eval_line(line, &env, output)?,
            Mode::Tokens => print_tokens(line, output)?,
        }
    }
}

fn eval_line<W: Write>(line: String, env: &Environment, output: &mut W) -> io::Result<()> {
    match Parser::new(Lexer::new(line)).parse_program() {
        Err(errors) => {
            for err in errors.iter() {
                writeln!(output, "\t{}", err)?;
            }
        }
        Ok(program) => {
            let evaluated = evaluator::eval_with_output((&program).into(), env, output);
            if !evaluated.is_null() {
                writeln!(output, "{}", evaluated.inspect())?;
            }
        }
    }
    Ok(())
}

fn print_tokens<W: Write>(line: String, output: &mut W) -> io::Result<()> {
    for token in Lexer::new(line).take_while(|token| !token.is(TokenType::Eof)) {
        writeln!(output, "{} {:?}", token.token_type(), token.literal())?;
    }
    Ok(())
}
