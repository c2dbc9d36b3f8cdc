use std::fs;
use std::path::PathBuf;

use super::*;

#[test]
fn test_hack_machine_defaults() {
    let m = MachineConfig::default();
    assert_eq!(m.stack_base, 256);
    assert_eq!(m.temp_base, 5);
    assert_eq!(m.temp_size, 8);
    assert_eq!(m.frame_register, "R13");
    assert_eq!(m.return_register, "R14");
    assert_eq!(m.max_constant, 32767);
    assert_eq!(m.entry, "Sys.init");
}

#[test]
fn test_runtime_defaults() {
    let r = RuntimeNames::default();
    assert_eq!(r.alloc, "Memory.alloc");
    assert_eq!(r.string_append, "String.appendChar");
    assert_eq!(r.divide, "Math.divide");
}

#[test]
fn test_load_project() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("jack.toml");
    fs::write(
        &toml_path,
        r#"[project]
name = "pong"
source = "src"
"#,
    )
    .unwrap();

    let project = Project::load(&toml_path).unwrap();
    assert_eq!(project.name, "pong");
    assert_eq!(project.source_dir, dir.path().join("src"));
    assert_eq!(project.output, dir.path().join("pong.asm"));
    assert!(project.bootstrap);
    assert!(!project.comments);
}

#[test]
fn test_all_sections() {
    let project = Project::parse(
        r#"
# game build
[project]
name = "square"
output = "out/Square.asm"

[build]
bootstrap = false
comments = true

[runtime]
multiply = "Fast.mul"

[machine]
stack_base = 1_024
entry = "Boot.start"
"#,
        PathBuf::from("/tmp/square"),
    )
    .unwrap();
    assert_eq!(project.output, PathBuf::from("/tmp/square/out/Square.asm"));
    assert!(!project.bootstrap);
    assert!(project.comments);
    assert_eq!(project.runtime.multiply, "Fast.mul");
    assert_eq!(project.runtime.divide, "Math.divide");
    assert_eq!(project.machine.stack_base, 1024);
    assert_eq!(project.machine.entry, "Boot.start");
}

#[test]
fn test_missing_name_is_an_error() {
    let err = Project::parse("[build]\ncomments = true\n", PathBuf::from(".")).unwrap_err();
    assert!(err.message.contains("missing 'name'"));
}

#[test]
fn test_bad_values_are_errors() {
    let err = Project::parse(
        "[project]\nname = \"x\"\n[build]\nbootstrap = yes\n",
        PathBuf::from("."),
    )
    .unwrap_err();
    assert!(err.message.contains("true or false"));

    let err = Project::parse(
        "[project]\nname = \"x\"\n[machine]\ntemp_base = five\n",
        PathBuf::from("."),
    )
    .unwrap_err();
    assert!(err.message.contains("must be a number"));
}

#[test]
fn test_find_walks_ancestors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("jack.toml"), "[project]\nname = \"a\"\n").unwrap();
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    assert_eq!(
        Project::find(&nested),
        Some(dir.path().join("jack.toml"))
    );
}
