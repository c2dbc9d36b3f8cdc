use crate::ast::*;
use crate::span::Spanned;
use crate::syntax::parse_class;

fn parse(source: &str) -> Class {
    parse_class(source).unwrap()
}

fn parse_err(source: &str) -> String {
    parse_class(source).unwrap_err().node.to_string()
}

/// Parse `expr` as the value of a `let` inside a throwaway function.
fn parse_expr(expr: &str) -> Spanned<Expr> {
    let source = format!("class T {{ function void f() {{ let x = {}; return; }} }}", expr);
    let class = parse(&source);
    match &class.subroutines[0].statements[0].node {
        Stmt::Let { value, .. } => value.clone(),
        other => panic!("expected let, got {:?}", other),
    }
}

/// Render an expression tree fully parenthesized.
fn shape(expr: &Expr) -> String {
    match expr {
        Expr::BinOp { op, lhs, rhs } => {
            format!("({} {} {})", shape(&lhs.node), op.as_str(), shape(&rhs.node))
        }
        Expr::UnaryOp { op, operand } => {
            let sym = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "~",
            };
            format!("{}{}", sym, shape(&operand.node))
        }
        Expr::IntConst(n) => n.to_string(),
        Expr::VarRef(name) => name.clone(),
        Expr::Group(inner) => format!("[{}]", shape(&inner.node)),
        other => format!("{:?}", other),
    }
}

#[test]
fn test_minimal_class() {
    let class = parse("class Main { }");
    assert_eq!(class.name.node, "Main");
    assert!(class.var_decs.is_empty());
    assert!(class.subroutines.is_empty());
}

#[test]
fn test_class_var_decs_expand_name_lists() {
    let class = parse("class P { field int x, y; static boolean ready; field Array data; }");
    assert_eq!(class.var_decs.len(), 4);
    assert_eq!(class.var_decs[1].name.node, "y");
    assert_eq!(class.var_decs[1].kind, ClassVarKind::Field);
    assert_eq!(class.var_decs[2].kind, ClassVarKind::Static);
    assert_eq!(class.var_decs[3].ty, Type::Class("Array".to_string()));
}

#[test]
fn test_subroutine_signature() {
    let class = parse(
        "class P {
            method int dist(P other, int scale) {
                var int dx, dy;
                var char c;
                return dx;
            }
        }",
    );
    let sub = &class.subroutines[0];
    assert_eq!(sub.kind, SubroutineKind::Method);
    assert_eq!(sub.return_type, Type::Int);
    assert_eq!(sub.params.len(), 2);
    assert_eq!(sub.params[0].ty, Type::Class("P".to_string()));
    assert_eq!(sub.locals.len(), 3);
    assert_eq!(sub.locals[2].ty, Type::Char);
    assert_eq!(sub.statements.len(), 1);
}

#[test]
fn test_statements() {
    let class = parse(
        "class M {
            function void main() {
                var Array a;
                let a[1] = 2;
                if (true) { do Output.printInt(1); } else { return; }
                while (false) { }
                return;
            }
        }",
    );
    let stmts = &class.subroutines[0].statements;
    assert!(matches!(&stmts[0].node, Stmt::Let { index: Some(_), .. }));
    match &stmts[1].node {
        Stmt::If {
            then_body,
            else_body,
            ..
        } => {
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.len(), 1);
        }
        other => panic!("expected if, got {:?}", other),
    }
    assert!(matches!(&stmts[2].node, Stmt::While { body, .. } if body.is_empty()));
    assert!(matches!(&stmts[3].node, Stmt::Return(None)));
}

#[test]
fn test_do_call_with_receiver() {
    let class = parse("class M { function void main() { do game.run(1, x); return; } }");
    match &class.subroutines[0].statements[0].node {
        Stmt::Do(call) => {
            assert_eq!(call.receiver.as_ref().map(|r| r.node.as_str()), Some("game"));
            assert_eq!(call.name.node, "run");
            assert_eq!(call.args.len(), 2);
        }
        other => panic!("expected do, got {:?}", other),
    }
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(shape(&parse_expr("a - b - c").node), "((a - b) - c)");
    assert_eq!(shape(&parse_expr("a / b / c").node), "((a / b) / c)");
}

#[test]
fn test_operator_precedence() {
    assert_eq!(shape(&parse_expr("1 + 2 * 3").node), "(1 + (2 * 3))");
    assert_eq!(
        shape(&parse_expr("a < b & c = d | e").node),
        "(((a < b) & (c = d)) | e)"
    );
}

#[test]
fn test_unary_binds_to_single_term() {
    assert_eq!(shape(&parse_expr("-x * y").node), "(-x * y)");
    assert_eq!(shape(&parse_expr("~(a & b)").node), "~[(a & b)]");
}

#[test]
fn test_term_forms() {
    assert!(matches!(parse_expr("\"hi\"").node, Expr::StringConst(ref s) if s == "hi"));
    assert!(matches!(parse_expr("null").node, Expr::NullConst));
    assert!(matches!(parse_expr("this").node, Expr::ThisRef));
    assert!(matches!(parse_expr("true").node, Expr::BoolConst(true)));
    assert!(matches!(parse_expr("a[i + 1]").node, Expr::ArrayAccess { .. }));
    assert!(matches!(parse_expr("f()").node, Expr::Call(ref c) if c.receiver.is_none()));
}

#[test]
fn test_expression_span_covers_operands() {
    let source = "class T { function void f() { let x = 10 + 20; return; } }";
    let class = parse(source);
    let Stmt::Let { value, .. } = &class.subroutines[0].statements[0].node else {
        panic!("expected let");
    };
    assert_eq!(&source[value.span.range()], "10 + 20");
}

#[test]
fn test_missing_semicolon_names_the_token() {
    let msg = parse_err("class M { function void main() { let x = 1 return; } }");
    assert!(msg.contains("expected ';'"), "{}", msg);
    assert!(msg.contains("'return'"), "{}", msg);
}

#[test]
fn test_trailing_tokens_rejected() {
    assert!(parse_err("class A { } class B { }").contains("expected end of file"));
}

#[test]
fn test_unknown_statement() {
    assert!(parse_err("class A { function void f() { x = 1; } }").contains("expected statement"));
}

fn chain(terms: usize) -> String {
    vec!["1"; terms].join(" + ")
}

#[test]
fn test_long_operator_chain_hits_nesting_limit() {
    let source = format!("class A {{ function int f() {{ return {}; }} }}", chain(1000));
    let err = parse_class(&source).unwrap_err();
    assert_eq!(err.node.kind(), "SyntaxError");
    assert!(err.node.to_string().contains("nesting depth"), "{}", err.node);
}

#[test]
fn test_chain_depth_is_released_after_each_expression() {
    // Each chain alone fits; together they would not if folds leaked depth.
    let lets = (0..4)
        .map(|_| format!("let x = {};", chain(200)))
        .collect::<Vec<_>>()
        .join(" ");
    let source = format!(
        "class A {{ function void f() {{ var int x; {} return; }} }}",
        lets
    );
    let class = parse(&source);
    assert_eq!(class.subroutines[0].statements.len(), 5);

    let expr = parse_expr(&chain(200));
    let mut depth = 0;
    let mut node = &expr.node;
    while let Expr::BinOp { lhs, rhs, .. } = node {
        assert!(matches!(rhs.node, Expr::IntConst(1)));
        depth += 1;
        node = &lhs.node;
    }
    assert_eq!(depth, 199);
}
