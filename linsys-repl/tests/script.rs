use std::{io::Write, process::{Command, Output, Stdio}};

/// Runs the binary with the given script on stdin.
fn run(args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_linsys"))
        .args(args)
        .env_remove("LINSYS_MAX_NUMERATOR")
        .env_remove("LINSYS_MAX_DENOMINATOR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn elimination_script() {
    let output = run(&[], "# the example system\nload 2x + 3y = 12; x - y = 1\nadd 1 2\ndiv 1 2\n");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success());
    assert!(stdout.contains("(3, 2, 13)"));
    assert!(stdout.contains("(1, 3/2, 6)"));
}

#[test]
fn notebook_script() {
    let script = "load 2x + 3y = 12; x - y = 1\nisolate 2 x\nsubst 3 1\n";
    let output = run(&["--method", "notebook"], script);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(output.status.success());
    assert!(stdout.contains("x = 1 + y"));
}

#[test]
fn failing_line_fails_the_run() {
    let output = run(&[], "load 2x + 3y = 12; x - y = 1\ndiv 1 0\nadd 1 2\n");
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());

    // the lines after the error still run
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("(3, 2, 13)"));
}

#[test]
fn range_from_arguments() {
    let output = run(&["--max-numerator", "5"], "load 2x + 3y = 12; x - y = 1\n");
    assert!(!output.status.success());
}
