use crate::environment::Environment;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use custom_error::custom_error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

custom_error! {
    pub RunError

    ReadScript{path: String, source: io::Error} = "could not read {path}: {source}",
    Output{source: io::Error} = "could not write output: {source}",
}

/// Parses and evaluates the script at `path` in a fresh environment.
///
/// Syntax errors are reported and nothing is evaluated. Runtime errors are
/// part of the script's result, not a failure of the run.
pub fn run_file<P: AsRef<Path>, W: Write>(path: P, output: &mut W) -> Result<(), RunError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| RunError::ReadScript {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = source.len(), "running script");
    run_source(source, output)
}

pub(crate) fn run_source<W: Write>(source: String, output: &mut W) -> Result<(), RunError> {
    let program = match Parser::new(Lexer::new(source)).parse_program() {
        Ok(program) => program,
        Err(errors) => {
            writeln!(output, "parser errors:")?;
            for err in errors.iter() {
                writeln!(output, "\t{}", err)?;
            }
            return Ok(());
        }
    };

    let env = Environment::new();
    let evaluated = evaluator::eval_with_output((&program).into(), &env, output);
    if !evaluated.is_null() {
        writeln!(output, "{}", evaluated.inspect())?;
    }
    Ok(())
}
