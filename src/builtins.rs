use crate::object::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::io::Write;

/// Host functions get the writer that `puts` prints to.
pub type BuiltinFunction = fn(&mut dyn Write, Vec<Object>) -> Result<Object>;

/// A host function callable from scripts.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFunction,
}

impl Builtin {
    pub fn call(&self, output: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
        (self.func)(output, args)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

fn check_arity(args: &[Object], want: usize) -> Result<()> {
    if args.len() != want {
        return Err(EvalError::IncorrectArity {
            got: args.len(),
            want,
        });
    }
    Ok(())
}

fn single_array(fn_name: &'static str, args: Vec<Object>) -> Result<std::rc::Rc<Vec<Object>>> {
    check_arity(&args, 1)?;

    match args.into_iter().next() {
        Some(Object::Array(a)) => Ok(a),
        Some(obj) => Err(EvalError::UnsupportedArgType {
            fn_name,
            type_name: obj.type_name(),
        }),
        None => Err(EvalError::IncorrectArity { got: 0, want: 1 }),
    }
}

fn len(_: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
    check_arity(&args, 1)?;

    match &args[0] {
        Object::String(s) => Ok(Object::Integer(s.chars().count() as i64)),
        Object::Array(a) => Ok(Object::Integer(a.len() as i64)),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "len",
            type_name: obj.type_name(),
        }),
    }
}

fn first(_: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
    let array = single_array("first", args)?;
    Ok(array.first().cloned().unwrap_or(NULL))
}

fn last(_: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
    let array = single_array("last", args)?;
    Ok(array.last().cloned().unwrap_or(NULL))
}

fn rest(_: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
    let array = single_array("rest", args)?;
    if array.is_empty() {
        return Ok(NULL);
    }
    Ok(array[1..].to_vec().into())
}

fn push(_: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
    check_arity(&args, 2)?;

    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(Object::Array(a)), Some(value)) => {
            let mut elements = Vec::with_capacity(a.len() + 1);
            elements.extend(a.iter().cloned());
            elements.push(value);
            Ok(elements.into())
        }
        (Some(obj), _) => Err(EvalError::UnsupportedArgType {
            fn_name: "push",
            type_name: obj.type_name(),
        }),
        (None, _) => Err(EvalError::IncorrectArity { got: 0, want: 2 }),
    }
}

fn puts(output: &mut dyn Write, args: Vec<Object>) -> Result<Object> {
    for arg in args.iter() {
        writeln!(output, "{}", arg.inspect()).map_err(|err| EvalError::Output {
            message: err.to_string(),
        })?;
    }
    Ok(NULL)
}

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let table: [(&'static str, BuiltinFunction); 6] = [
            ("len", len),
            ("first", first),
            ("last", last),
            ("rest", rest),
            ("push", push),
            ("puts", puts),
        ];
        table
            .iter()
            .map(|&(name, func)| (name, Builtin { name, func }))
            .collect()
    };
}

/// Finds the built-in bound to `name`, if there is one.
pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get(name).map(|builtin| Object::Builtin(*builtin))
}
