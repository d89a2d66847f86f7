use super::*;
use crate::lexer::Lexer;
use crate::object::{FALSE, TRUE};
use crate::parser::Parser;
use pretty_assertions::assert_eq;

fn test_eval_in(input: &str, env: &Environment) -> Object {
    let program = Parser::new(Lexer::new(input.to_owned()))
        .parse_program()
        .expect("Parse errors found");
    eval_with_output((&program).into(), env, &mut io::sink())
}

fn test_eval(input: &str) -> Object {
    test_eval_in(input, &Environment::new())
}

fn run_eval_tests(cases: Vec<(&str, Object)>) {
    for (input, expected) in cases.into_iter() {
        assert_eq!(test_eval(input), expected, "input: {}", input);
    }
}

fn run_error_tests(cases: Vec<(&str, &str)>) {
    for (input, message) in cases.into_iter() {
        match test_eval(input) {
            Object::Error(err) => assert_eq!(err.to_string(), message, "input: {}", input),
            obj => panic!("expected error for {:?}, got {:?}", input, obj),
        }
    }
}

#[test]
fn test_integer_arithmetic() {
    let cases = vec![
        ("5", 5.into()),
        ("10", 10.into()),
        ("-5", (-5).into()),
        ("-10", (-10).into()),
        ("+5", 5.into()),
        ("5 + 5 + 5 + 5 - 10", 10.into()),
        ("2 * 2 * 2 * 2 * 2", 32.into()),
        ("-50 + 100 + -50", 0.into()),
        ("5 * 2 + 10", 20.into()),
        ("5 + 2 * 10", 25.into()),
        ("20 + 2 * -10", 0.into()),
        ("50 / 2 * 2 + 10", 60.into()),
        ("2 * (5 + 10)", 30.into()),
        ("3 * 3 * 3 + 10", 37.into()),
        ("3 * (3 * 3) + 10", 37.into()),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50.into()),
        ("-7 / 2", (-3).into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_integer_overflow_wraps() {
    let cases = vec![
        ("9223372036854775807 + 1", Object::Integer(i64::MIN)),
        ("-9223372036854775807 - 2", Object::Integer(i64::MAX)),
        ("let min = -9223372036854775807 - 1; -min", Object::Integer(i64::MIN)),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_boolean_expressions() {
    let cases = vec![
        ("true", TRUE),
        ("false", FALSE),
        ("1 < 2", TRUE),
        ("1 > 2", FALSE),
        ("1 < 1", FALSE),
        ("1 > 1", FALSE),
        ("1 == 1", TRUE),
        ("1 != 1", FALSE),
        ("1 == 2", FALSE),
        ("1 != 2", TRUE),
        ("true == true", TRUE),
        ("false == false", TRUE),
        ("true == false", FALSE),
        ("true != false", TRUE),
        ("false != true", TRUE),
        ("(1 < 2) == true", TRUE),
        ("(1 < 2) == false", FALSE),
        ("(1 > 2) == true", FALSE),
        ("(1 > 2) == false", TRUE),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", TRUE),
        ("1 == true", FALSE),
        ("1 != true", TRUE),
        ("\"a\" < \"b\"", TRUE),
        ("\"b\" > \"a\"", TRUE),
        ("\"abc\" == \"abc\"", TRUE),
        ("\"a\" != \"a\"", FALSE),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_logical_operators() {
    let cases = vec![
        ("true && true", TRUE),
        ("true && false", FALSE),
        ("false || true", TRUE),
        ("false || false", FALSE),
        ("1 < 2 && 2 < 3", TRUE),
        ("1 > 2 || 2 > 3", FALSE),
        ("true || false && false", TRUE),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_bang_operator() {
    let cases = vec![
        ("!true", FALSE),
        ("!false", TRUE),
        ("!5", FALSE),
        ("!!true", TRUE),
        ("!!false", FALSE),
        ("!!5", TRUE),
        ("!0", FALSE),
        ("!\"\"", FALSE),
        ("!(if (false) { 5; })", TRUE),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_conditionals() {
    let cases = vec![
        ("if (true) { 10 }", 10.into()),
        ("if (false) { 10 }", NULL),
        ("if (1) { 10 }", 10.into()),
        ("if (1 < 2) { 10 }", 10.into()),
        ("if (1 > 2) { 10 }", NULL),
        ("if (1 > 2) { 10 } else { 20 }", 20.into()),
        ("if (1 < 2) { 10 } else { 20 }", 10.into()),
        ("if ((if (false) { 10 })) { 10 } else { 20 }", 20.into()),
        ("if (true) { }", NULL),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_return_statements() {
    let cases = vec![
        ("return 10;", 10.into()),
        ("return 10; 9;", 10.into()),
        ("return 2 * 5; 9;", 10.into()),
        ("9; return 2 * 5; 9;", 10.into()),
        ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10.into()),
        ("let f = fn(x) { return x; x + 10; }; f(10);", 10.into()),
        (
            "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
            20.into(),
        ),
        ("let f = fn() { let v = if (true) { return 7; }; 99 }; f()", 7.into()),
        ("let f = fn() { return; }; f()", NULL),
        ("return;", NULL),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_return_inside_expressions() {
    let cases = vec![
        ("fn() { let a = [if (true) { return 1 }]; 99 }()", 1.into()),
        ("fn() { puts(if (true) { return 2 }); 99 }()", 2.into()),
        ("fn() { 1 + if (true) { return 3 } }()", 3.into()),
        ("fn() { -if (true) { return 4 } }()", 4.into()),
        ("fn() { {if (true) { return 5 }: 1}; 99 }()", 5.into()),
        ("fn() { [1, 2][if (true) { return 6 }] }()", 6.into()),
        ("fn() { let f = fn(x) { x }; f(if (true) { return 7 }); 99 }()", 7.into()),
        ("fn() { if (true) { return 8 }(1) }()", 8.into()),
        ("let a = [if (true) { return 9 }]; 99", 9.into()),
        ("1 + if (true) { return 10 }", 10.into()),
        (
            "let f = fn() { [if (true) { return 11 }] }; [f(), 12]",
            vec![11.into(), 12.into()].into(),
        ),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_return_stops_later_statements() {
    let mut output = Vec::new();
    let program = Parser::new(Lexer::new(
        "let f = fn() { puts(\"before\"); let x = [if (true) { return 1 }]; puts(\"after\"); x }; f()"
            .to_owned(),
    ))
    .parse_program()
    .expect("Parse errors found");

    let result = eval_with_output((&program).into(), &Environment::new(), &mut output);

    assert_eq!(result, 1.into());
    assert_eq!(String::from_utf8(output).unwrap(), "before\n");
}

#[test]
fn test_error_handling() {
    let cases = vec![
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("+\"a\"", "unknown operator: +STRING"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
        (
            "{\"name\": \"Monkey\"}[fn(x) { x }];",
            "unusable as hash key: FUNCTION",
        ),
        ("{[1]: 2}", "unusable as hash key: ARRAY"),
        ("1 && true", "type mismatch: INTEGER && BOOLEAN"),
        ("1 || 2", "unknown operator: INTEGER || INTEGER"),
        ("\"a\" && \"b\"", "unknown operator: STRING && STRING"),
        ("5 / 0", "division by zero"),
        ("let x = 10; x / (x - 10)", "division by zero"),
        ("5(1)", "not a function: INTEGER"),
        ("1[0]", "index operator not supported: INTEGER"),
        ("[1][true]", "index operator not supported: ARRAY"),
        ("[1, foobar, 3]", "identifier not found: foobar"),
        ("let add = fn(a, b) { a + b }; add(1, missing)", "identifier not found: missing"),
        ("let x = y; 5", "identifier not found: y"),
        ("let f = fn() { let inner = 1; inner }; f(); inner", "identifier not found: inner"),
    ];

    run_error_tests(cases);
}

#[test]
fn test_error_inspect() {
    assert_eq!(test_eval("-true").inspect(), "ERROR: unknown operator: -BOOLEAN");
}

#[test]
fn test_function_arity() {
    let cases = vec![
        ("let f = fn(x) { x }; f(1, 2)", "wrong number of arguments. got=2, want=1"),
        ("let f = fn(x, y) { x }; f(1)", "wrong number of arguments. got=1, want=2"),
        ("fn() { 1 }(1)", "wrong number of arguments. got=1, want=0"),
    ];

    run_error_tests(cases);
}

#[test]
fn test_let_statements() {
    let cases = vec![
        ("let a = 5; a;", 5.into()),
        ("let a = 5 * 5; a;", 25.into()),
        ("let a = 5; let b = a; b;", 5.into()),
        ("let a = 5; let b = a; let c = a + b + 5; c;", 15.into()),
        ("let a = 5;", NULL),
        ("let a = 1; let a = a + 1; a", 2.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_function_object() {
    match test_eval("fn(x) { x + 2; };") {
        Object::Function(func) => {
            let names: Vec<&str> = func.parameters.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(names, vec!["x"]);
            assert_eq!(func.body.to_string(), "{ (x + 2); }");
            assert_eq!(
                Object::Function(func).inspect(),
                "fn(x) { (x + 2); }"
            );
        }
        obj => panic!("expected function, got {:?}", obj),
    }
}

#[test]
fn test_function_application() {
    let cases = vec![
        ("let identity = fn(x) { x; }; identity(5);", 5.into()),
        ("let identity = fn(x) { return x; }; identity(5);", 5.into()),
        ("let double = fn(x) { x * 2; }; double(5);", 10.into()),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", 10.into()),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20.into()),
        ("fn(x) { x; }(5)", 5.into()),
        ("fn() { }()", NULL),
        ("let x = 5; let f = fn(x) { x * 2 }; f(1); x", 5.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_closures() {
    let cases = vec![
        (
            "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(2);",
            4.into(),
        ),
        ("let f = fn() { later }; let later = 5; f()", 5.into()),
        (
            "let x = 1; let f = fn() { x }; let g = fn(x) { f() }; g(100)",
            1.into(),
        ),
        (
            "let counter = fn(n) { fn() { n } }; let a = counter(1); let b = counter(2); a() + b()",
            3.into(),
        ),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_recursive_functions() {
    let input = "
let fibonacci = fn(x) {
    if (x == 0) {
        0
    } else {
        if (x == 1) {
            return 1;
        } else {
            fibonacci(x - 1) + fibonacci(x - 2);
        }
    }
};
fibonacci(15);";

    assert_eq!(test_eval(input), 610.into());
}

#[test]
fn test_higher_order_functions() {
    let map = "
let map = fn(arr, f) {
    let iter = fn(arr, accumulated) {
        if (len(arr) == 0) {
            accumulated
        } else {
            iter(rest(arr), push(accumulated, f(first(arr))));
        }
    };
    iter(arr, []);
};
let double = fn(x) { x * 2 };
map([1, 2, 3, 4], double);";

    let reduce = "
let reduce = fn(arr, initial, f) {
    let iter = fn(arr, result) {
        if (len(arr) == 0) {
            result
        } else {
            iter(rest(arr), f(result, first(arr)));
        }
    };
    iter(arr, initial);
};
let sum = fn(arr) { reduce(arr, 0, fn(initial, el) { initial + el }) };
sum([1, 2, 3, 4, 5]);";

    assert_eq!(
        test_eval(map),
        vec![2.into(), 4.into(), 6.into(), 8.into()].into()
    );
    assert_eq!(test_eval(reduce), 15.into());
}

#[test]
fn test_strings() {
    let cases = vec![
        ("\"Hello World!\"", "Hello World!".into()),
        ("\"Hello\" + \" \" + \"World!\"", "Hello World!".into()),
        ("\"\"", "".into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_builtin_functions() {
    let cases = vec![
        ("len(\"\")", 0.into()),
        ("len(\"four\")", 4.into()),
        ("len(\"hello world\")", 11.into()),
        ("len([1, 2, 3])", 3.into()),
        ("len([])", 0.into()),
        ("first([1, 2, 3])", 1.into()),
        ("first([])", NULL),
        ("last([1, 2, 3])", 3.into()),
        ("last([])", NULL),
        ("rest([1, 2, 3])", vec![2.into(), 3.into()].into()),
        ("rest([1])", Vec::<Object>::new().into()),
        ("rest([])", NULL),
        ("push([], 1)", vec![1.into()].into()),
        ("let a = [1]; push(a, 2); a", vec![1.into()].into()),
        ("puts(\"hello\", 1)", NULL),
        ("let len = fn(x) { 42 }; len(\"abc\")", 42.into()),
    ];

    run_eval_tests(cases);

    let errors = vec![
        ("len(1)", "argument to `len` not supported, got INTEGER"),
        ("len(\"one\", \"two\")", "wrong number of arguments. got=2, want=1"),
        ("first(1)", "argument to `first` not supported, got INTEGER"),
        ("push(1, 1)", "argument to `push` not supported, got INTEGER"),
    ];

    run_error_tests(errors);
}

#[test]
fn test_builtin_inspect() {
    assert_eq!(test_eval("len").inspect(), "builtin function");
}

#[test]
fn test_array_literals() {
    assert_eq!(
        test_eval("[1, 2 * 2, 3 + 3]"),
        vec![1.into(), 4.into(), 6.into()].into()
    );
    assert_eq!(test_eval("[1, \"a\", true]").inspect(), "[1, a, true]");
}

#[test]
fn test_array_index_expressions() {
    let cases = vec![
        ("[1, 2, 3][0]", 1.into()),
        ("[1, 2, 3][1]", 2.into()),
        ("[1, 2, 3][2]", 3.into()),
        ("let i = 0; [1][i];", 1.into()),
        ("[1, 2, 3][1 + 1];", 3.into()),
        ("let myArray = [1, 2, 3]; myArray[2];", 3.into()),
        (
            "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
            6.into(),
        ),
        ("let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]", 2.into()),
        ("[1, 2, 3][3]", NULL),
        ("[1, 2, 3][-1]", NULL),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_hash_literals() {
    let input = "
let two = \"two\";
{
    \"one\": 10 - 9,
    two: 1 + 1,
    \"thr\" + \"ee\": 6 / 2,
    4: 4,
    true: 5,
    false: 6
}";

    let hash = match test_eval(input) {
        Object::Hash(hash) => hash,
        obj => panic!("expected hash, got {:?}", obj),
    };

    let expected: Vec<(HashKey, Object)> = vec![
        ("one".into(), 1.into()),
        ("two".into(), 2.into()),
        ("three".into(), 3.into()),
        (4.into(), 4.into()),
        (true.into(), 5.into()),
        (false.into(), 6.into()),
    ];

    assert_eq!(hash.len(), expected.len());
    for (key, value) in expected.iter() {
        assert_eq!(hash.get(key), Some(value), "key: {}", key);
    }
}

#[test]
fn test_hash_inspect_is_ordered() {
    assert_eq!(
        test_eval("{\"b\": 1, 2: true, false: 3}").inspect(),
        "{2: true, false: 3, b: 1}"
    );
    assert_eq!(test_eval("{1: 1, 1: 2}").inspect(), "{1: 2}");
}

#[test]
fn test_hash_index_expressions() {
    let cases = vec![
        ("{\"foo\": 5}[\"foo\"]", 5.into()),
        ("{\"foo\": 5}[\"bar\"]", NULL),
        ("let key = \"foo\"; {\"foo\": 5}[key]", 5.into()),
        ("{}[\"foo\"]", NULL),
        ("{5: 5}[5]", 5.into()),
        ("{true: 5}[true]", 5.into()),
        ("{false: 5}[false]", 5.into()),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_identity_equality() {
    let cases = vec![
        ("let a = [1]; a == a", TRUE),
        ("[1] == [1]", FALSE),
        ("[1] != [1]", TRUE),
        ("let h = {1: 2}; let g = h; h == g", TRUE),
        ("{1: 2} == {1: 2}", FALSE),
        ("let f = fn() { 1 }; f == f", TRUE),
        ("fn() { 1 } == fn() { 1 }", FALSE),
        ("len == len", TRUE),
        ("len == first", FALSE),
        ("if (false) { 1 } == if (false) { 2 }", TRUE),
        ("\"a\" == 1", FALSE),
    ];

    run_eval_tests(cases);
}

#[test]
fn test_environment_persists_between_evaluations() {
    let env = Environment::new();

    assert_eq!(test_eval_in("let a = 1;", &env), NULL);
    assert_eq!(test_eval_in("let add = fn(x) { x + a };", &env), NULL);
    assert_eq!(test_eval_in("add(a + 1)", &env), 3.into());
    assert_eq!(test_eval_in("let a = 10; add(0)", &env), 10.into());
}

#[test]
fn test_return_is_unwrapped_for_any_node() {
    let program = Parser::new(Lexer::new("return 5; if (true) { return 4; 3 }".to_owned()))
        .parse_program()
        .expect("Parse errors found");
    let env = Environment::new();
    let mut sink = io::sink();

    assert_eq!(
        eval_with_output((&program.statements[0]).into(), &env, &mut sink),
        5.into()
    );

    match &program.statements[1] {
        Statement::Expr(stmt) => match &stmt.expression {
            Expression::If(if_expr) => {
                let node: Node = (&if_expr.consequence).into();
                assert_eq!(eval_with_output(node, &env, &mut sink), 4.into());
            }
            expr => panic!("expected if expression, got {:?}", expr),
        },
        stmt => panic!("expected expression statement, got {:?}", stmt),
    }
}

#[test]
fn test_eval_single_expression_node() {
    let program = Parser::new(Lexer::new("1 + 2".to_owned()))
        .parse_program()
        .expect("Parse errors found");

    match &program.statements[0] {
        Statement::Expr(stmt) => {
            let node: Node = (&stmt.expression).into();
            assert_eq!(eval(node, &Environment::new()), 3.into());
        }
        stmt => panic!("expected expression statement, got {:?}", stmt),
    }
}
