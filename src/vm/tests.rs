use super::*;

#[test]
fn test_display_matches_text_format() {
    let cmds = vec![
        VmCommand::Push(Segment::Constant, 7),
        VmCommand::Pop(Segment::Local, 0),
        VmCommand::Arithmetic(ArithOp::Add),
        VmCommand::IfGoto("WHILE_END_0".into()),
        VmCommand::Function {
            name: "Main.main".into(),
            n_locals: 2,
        },
        VmCommand::Call {
            name: "Math.multiply".into(),
            n_args: 2,
        },
        VmCommand::Return,
    ];
    insta::assert_snapshot!(render(&cmds).trim_end(), @r"
    push constant 7
    pop local 0
    add
    if-goto WHILE_END_0
    function Main.main 2
    call Math.multiply 2
    return
    ");
}

#[test]
fn test_arithmetic_stack_effects() {
    for op in ArithOp::ALL {
        let effect = VmCommand::Arithmetic(op).stack_effect();
        if op.is_unary() {
            assert_eq!(effect, 0, "{}", op.as_str());
        } else {
            assert_eq!(effect, -1, "{}", op.as_str());
        }
    }
}

#[test]
fn test_call_stack_effect() {
    let call = |n_args| VmCommand::Call {
        name: "F.f".into(),
        n_args,
    };
    assert_eq!(call(0).stack_effect(), 1);
    assert_eq!(call(1).stack_effect(), 0);
    assert_eq!(call(3).stack_effect(), -2);
}

#[test]
fn test_parse_program_skips_comments_and_blanks() {
    let source = "// header\n\npush constant 2   // two\n  push constant 3\nadd\n";
    let cmds = parse_program(source).unwrap();
    assert_eq!(cmds.len(), 3);
    assert_eq!(cmds[0].node, VmCommand::Push(Segment::Constant, 2));
    assert_eq!(&source[cmds[1].span.range()], "push constant 3");
    assert_eq!(cmds[2].node, VmCommand::Arithmetic(ArithOp::Add));
}

#[test]
fn test_parse_every_command_kind() {
    let source = "\
function Foo.bar 3
push argument 1
pop that 0
label LOOP
goto LOOP
if-goto END
call Foo.baz 2
return
not
";
    let cmds = parse_program(source).unwrap();
    let text: Vec<String> = cmds.iter().map(|c| c.node.to_string()).collect();
    assert_eq!(text.join("\n") + "\n", source);
}

#[test]
fn test_unknown_opcode_is_unsupported() {
    let err = parse_command("mul").unwrap_err();
    assert_eq!(err.kind(), "UnsupportedInstruction");
}

#[test]
fn test_malformed_commands_are_syntax_errors() {
    for line in [
        "push constant",
        "push heap 1",
        "pop local -1",
        "push local x",
        "add 1",
        "label 1abc",
        "label a$b",
        "goto Foo.f$ret$0",
        "call Foo.bar",
        "return now",
    ] {
        let err = parse_command(line).unwrap_err();
        assert_eq!(err.kind(), "SyntaxError", "{}", line);
    }
}

#[test]
fn test_parse_error_points_at_line() {
    let source = "push constant 1\npush nowhere 2\n";
    let err = parse_program(source).unwrap_err();
    assert_eq!(err.span.line_in(source), 2);
    assert_eq!(&source[err.span.range()], "push nowhere 2");
}

#[test]
fn test_net_stack_effect_of_let() {
    let cmds = vec![
        VmCommand::Push(Segment::Constant, 2),
        VmCommand::Push(Segment::Constant, 3),
        VmCommand::Arithmetic(ArithOp::Add),
        VmCommand::Pop(Segment::Local, 0),
    ];
    assert_eq!(net_stack_effect(&cmds), 0);
}
