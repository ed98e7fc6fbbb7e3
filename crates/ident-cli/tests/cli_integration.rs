//! Integration tests for `ident inspect` and `ident config`.

use ident_cli::commands::{config, inspect};
use std::path::{Path, PathBuf};
use termcolor::Buffer;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn inspect_report(args: inspect::InspectArgs, search_dir: &Path) -> String {
    let mut buf = Buffer::no_color();
    inspect::run(&args, search_dir, &mut buf).expect("inspect failed");
    String::from_utf8(buf.into_inner()).unwrap()
}

fn args_for(fixture: &str) -> inspect::InspectArgs {
    inspect::InspectArgs {
        file: fixtures_dir().join(fixture),
        ..Default::default()
    }
}

#[test]
fn test_inspect_plain_object() {
    let dir = tempfile::tempdir().unwrap();
    let report = inspect_report(args_for("person.json"), dir.path());
    let lines = report.lines().collect::<Vec<_>>();
    assert_eq!(lines[1], "| object");
    assert_eq!(lines[2], "| type: object");
    assert_eq!(lines[4], r#"| .first: string;  // "Garin""#);
    assert_eq!(lines[5], r#"| .last: string;  // "Wally""#);
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_inspect_script_root() {
    let dir = tempfile::tempdir().unwrap();
    let report = inspect_report(args_for("script_root.json"), dir.path());
    let body = report.lines().skip(4).collect::<Vec<_>>();
    assert_eq!(
        body,
        vec![
            "| .adjustTask(arg0: CapIDModel, arg1: number): ScriptResult<unknown>;",
            "+ .adjustTask(arg0: CapIDModel, arg1: number, arg2: string): ScriptResult<unknown>;",
            "| .capId: CapIDModel;  // {}",
            r#"| .debugOutput: string;  // "<debugOutput>""#,
            "| .hashCode(): number;",
            r#"| .spc: JavaString;  // "{}""#,
            "+====================================================================+",
        ]
    );
}

#[test]
fn test_inspect_hide_common() {
    let dir = tempfile::tempdir().unwrap();
    let args = inspect::InspectArgs {
        hide_common: true,
        ..args_for("script_root.json")
    };
    let report = inspect_report(args, dir.path());
    assert!(!report.contains("hashCode"));
    assert!(report.contains(".capId: CapIDModel;"));
}

#[test]
fn test_inspect_depth_override() {
    let dir = tempfile::tempdir().unwrap();

    let shallow = inspect_report(args_for("nested.json"), dir.path());
    assert!(!shallow.contains(".leaf"));

    let args = inspect::InspectArgs {
        max_depth: Some(3),
        ..args_for("nested.json")
    };
    let deep = inspect_report(args, dir.path());
    let body = deep.lines().skip(4).collect::<Vec<_>>();
    assert_eq!(
        body,
        vec![
            "| .list: array<string>;  // foo,bar",
            r#"|   [0]: string;  // "foo""#,
            r#"|   [1]: string;  // "bar""#,
            r#"| .outer: object;  // {"inner":{"leaf":1}}"#,
            r#"|   .inner: object;  // {"leaf":1}"#,
            "|     .leaf: number;  // 1",
            "+====================================================================+",
        ]
    );
}

#[test]
fn test_inspect_uses_discovered_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ident.toml"), "redacted_keys = []\n").unwrap();
    let report = inspect_report(args_for("script_root.json"), dir.path());
    assert!(report.contains(r#"| .debugOutput: string;  // "earlier output""#));
}

#[test]
fn test_inspect_missing_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let args = inspect::InspectArgs {
        file: dir.path().join("nope.json"),
        ..Default::default()
    };
    let mut buf = Buffer::no_color();
    let err = inspect::run(&args, dir.path(), &mut buf).unwrap_err();
    assert!(format!("{:#}", err).contains("nope.json"));
}

#[test]
fn test_inspect_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "package_root = \"\"\n").unwrap();
    let args = inspect::InspectArgs {
        config: Some(path),
        ..args_for("person.json")
    };
    let mut buf = Buffer::no_color();
    let err = inspect::run(&args, dir.path(), &mut buf).unwrap_err();
    assert!(format!("{:#}", err).contains("package_root"));
}

#[test]
fn test_config_reflects_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "max_depth = 5\nignore_keys = [\"secret\"]\n").unwrap();

    let mut out = Vec::new();
    config::run(Some(&path), dir.path(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("max_depth = 5"));
    assert!(text.contains("\"secret\""));
    assert!(!text.contains("XAResource"));
}
