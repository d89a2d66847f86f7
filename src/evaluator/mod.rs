#[cfg(test)]
mod tests;

use crate::ast::{self, Expression, Node, Operator, Statement};
use crate::builtins;
use crate::environment::Environment;
use crate::object::{
    self, EvalError, FunctionObject, HashKey, HashPair, HashValue, Object, NULL,
};
use std::convert::{TryFrom, TryInto};
use std::io::{self, Write};

/// Why evaluation of a subtree stopped before producing a value.
#[derive(Debug)]
enum Unwind {
    /// A `return` on its way to the enclosing call or the program.
    Return(Object),
    Error(EvalError),
}

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Self::Error(err)
    }
}

type Result<T> = std::result::Result<T, Unwind>;

/// Evaluates `node` against `env`, with `puts` printing to stdout.
pub fn eval(node: Node, env: &Environment) -> Object {
    let stdout = io::stdout();
    let mut output = stdout.lock();
    eval_with_output(node, env, &mut output)
}

/// Evaluates `node` against `env`.
///
/// Runtime faults come back as `Object::Error`. A `return` that reaches
/// this point stops evaluation and yields the returned value.
pub fn eval_with_output(node: Node, env: &Environment, output: &mut dyn Write) -> Object {
    let result = match node {
        Node::Program(program) => eval_statements(&program.statements, env, output),
        Node::Statement(stmt) => eval_statement(stmt, env, output),
        Node::Block(block) => eval_statements(&block.statements, env, output),
        Node::Expression(expr) => eval_expression(expr, env, output),
    };

    match result {
        Ok(value) | Err(Unwind::Return(value)) => value,
        Err(Unwind::Error(err)) => {
            tracing::debug!(error = %err, "evaluation failed");
            Object::Error(err)
        }
    }
}

fn eval_statements(
    statements: &[Statement],
    env: &Environment,
    output: &mut dyn Write,
) -> Result<Object> {
    let mut result = NULL;

    for stmt in statements.iter() {
        result = eval_statement(stmt, env, output)?;
    }

    Ok(result)
}

fn eval_statement(stmt: &Statement, env: &Environment, output: &mut dyn Write) -> Result<Object> {
    match stmt {
        Statement::Expr(stmt) => eval_expression(&stmt.expression, env, output),
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env, output)?;
            env.set(&stmt.name.value, value);
            Ok(NULL)
        }
        Statement::Return(stmt) => {
            let value = match &stmt.return_value {
                Some(expr) => eval_expression(expr, env, output)?,
                None => NULL,
            };

            Err(Unwind::Return(value))
        }
    }
}

fn eval_expression(
    expr: &Expression,
    env: &Environment,
    output: &mut dyn Write,
) -> Result<Object> {
    match expr {
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::IntegerLiteral(int) => Ok(Object::Integer(int.value)),
        Expression::Boolean(b) => Ok(b.value.into()),
        Expression::String(s) => Ok(Object::String(s.value.clone())),
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env, output)?;
            Ok(eval_prefix_expression(prefix.operator, right)?)
        }
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env, output)?;
            let right = eval_expression(&infix.right, env, output)?;
            Ok(eval_infix_expression(infix.operator, left, right)?)
        }
        Expression::If(if_expr) => eval_if_expression(if_expr, env, output),
        Expression::Function(func) => Ok(FunctionObject {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: env.clone(),
        }
        .into()),
        Expression::Call(call) => {
            let function = eval_expression(&call.function, env, output)?;
            let arguments = eval_expressions(&call.arguments, env, output)?;
            apply_function(function, arguments, output)
        }
        Expression::Array(array) => Ok(eval_expressions(&array.elements, env, output)?.into()),
        Expression::Index(index) => {
            let left = eval_expression(&index.left, env, output)?;
            let index = eval_expression(&index.index, env, output)?;
            Ok(eval_index_expression(left, index)?)
        }
        Expression::Hash(hash) => eval_hash_literal(hash, env, output),
    }
}

/// Evaluates left to right, stopping at the first error or `return`.
fn eval_expressions(
    exprs: &[Expression],
    env: &Environment,
    output: &mut dyn Write,
) -> Result<Vec<Object>> {
    exprs
        .iter()
        .map(|expr| eval_expression(expr, env, output))
        .collect()
}

fn eval_identifier(ident: &ast::Identifier, env: &Environment) -> Result<Object> {
    let value = env
        .get(&ident.value)
        .or_else(|| builtins::lookup(&ident.value))
        .ok_or_else(|| EvalError::IdentifierNotFound {
            id: ident.value.clone(),
        })?;
    Ok(value)
}

fn eval_prefix_expression(operator: Operator, right: Object) -> object::Result<Object> {
    match operator {
        Operator::Bang => Ok((!right.truth_value()).into()),
        Operator::Minus => match right {
            Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
            obj => Err(EvalError::UnknownPrefixOperator {
                operator,
                operand: obj.type_name(),
            }),
        },
        Operator::Plus => match right {
            Object::Integer(n) => Ok(Object::Integer(n)),
            obj => Err(EvalError::UnknownPrefixOperator {
                operator,
                operand: obj.type_name(),
            }),
        },
        _ => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_infix_expression(
    operator: Operator,
    left: Object,
    right: Object,
) -> object::Result<Object> {
    match (&left, &right) {
        (Object::Integer(x), Object::Integer(y)) => eval_integer_infix_expression(operator, *x, *y),
        (Object::String(x), Object::String(y)) => eval_string_infix_expression(operator, x, y),
        (Object::Boolean(x), Object::Boolean(y)) if operator == Operator::And => {
            Ok((*x && *y).into())
        }
        (Object::Boolean(x), Object::Boolean(y)) if operator == Operator::Or => {
            Ok((*x || *y).into())
        }
        _ => match operator {
            Operator::Eq => Ok(left.is_identical(&right).into()),
            Operator::NotEq => Ok((!left.is_identical(&right)).into()),
            _ => Err(EvalError::binary_op_error(
                left.type_name(),
                operator,
                right.type_name(),
            )),
        },
    }
}

fn eval_integer_infix_expression(
    operator: Operator,
    left: i64,
    right: i64,
) -> object::Result<Object> {
    Ok(match operator {
        Operator::Plus => Object::Integer(left.wrapping_add(right)),
        Operator::Minus => Object::Integer(left.wrapping_sub(right)),
        Operator::Asterisk => Object::Integer(left.wrapping_mul(right)),
        Operator::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        Operator::LT => (left < right).into(),
        Operator::GT => (left > right).into(),
        Operator::Eq => (left == right).into(),
        Operator::NotEq => (left != right).into(),
        _ => return Err(EvalError::binary_op_error("INTEGER", operator, "INTEGER")),
    })
}

fn eval_string_infix_expression(
    operator: Operator,
    left: &str,
    right: &str,
) -> object::Result<Object> {
    Ok(match operator {
        Operator::Plus => Object::String([left, right].concat()),
        Operator::LT => (left < right).into(),
        Operator::GT => (left > right).into(),
        Operator::Eq => (left == right).into(),
        Operator::NotEq => (left != right).into(),
        _ => return Err(EvalError::binary_op_error("STRING", operator, "STRING")),
    })
}

fn eval_if_expression(
    if_expr: &ast::IfExpression,
    env: &Environment,
    output: &mut dyn Write,
) -> Result<Object> {
    let condition = eval_expression(&if_expr.condition, env, output)?;

    if condition.truth_value() {
        eval_statements(&if_expr.consequence.statements, env, output)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_statements(&alternative.statements, env, output)
    } else {
        Ok(NULL)
    }
}

fn apply_function(
    function: Object,
    arguments: Vec<Object>,
    output: &mut dyn Write,
) -> Result<Object> {
    match function {
        Object::Function(func) => {
            if arguments.len() != func.parameters.len() {
                return Err(EvalError::IncorrectArity {
                    got: arguments.len(),
                    want: func.parameters.len(),
                }
                .into());
            }

            tracing::trace!(arity = arguments.len(), "applying function");

            let env = Environment::new_enclosed(&func.env);
            for (param, arg) in func.parameters.iter().zip(arguments) {
                env.set(&param.value, arg);
            }

            // the call boundary is where a `return` stops
            match eval_statements(&func.body.statements, &env, output) {
                Err(Unwind::Return(value)) => Ok(value),
                result => result,
            }
        }
        Object::Builtin(builtin) => {
            tracing::trace!(name = builtin.name, "calling builtin");
            Ok(builtin.call(output, arguments)?)
        }
        obj => Err(EvalError::NotAFunction {
            type_name: obj.type_name(),
        }
        .into()),
    }
}

fn eval_index_expression(left: Object, index: Object) -> object::Result<Object> {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            // negative indices fail the conversion and read as missing
            let element = usize::try_from(*i).ok().and_then(|i| elements.get(i));
            Ok(element.cloned().unwrap_or(NULL))
        }
        (Object::Hash(hash), _) => {
            let key: HashKey = (&index).try_into()?;
            Ok(hash.get(&key).cloned().unwrap_or(NULL))
        }
        _ => Err(EvalError::NotIndexable {
            type_name: left.type_name(),
        }),
    }
}

fn eval_hash_literal(
    hash: &ast::HashLiteral,
    env: &Environment,
    output: &mut dyn Write,
) -> Result<Object> {
    let mut value = HashValue::default();

    for (key_expr, value_expr) in hash.pairs.iter() {
        let key = eval_expression(key_expr, env, output)?;
        let hash_key = HashKey::try_from(&key)?;
        let val = eval_expression(value_expr, env, output)?;

        value.pairs.insert(hash_key, HashPair { key, value: val });
    }

    Ok(value.into())
}
