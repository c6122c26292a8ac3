use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn run_source(program: &str) -> assert_cmd::assert::Assert {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.hn");
    fs::write(&path, program).unwrap();
    Command::cargo_bin("hindustani")
        .unwrap()
        .arg("run")
        .arg(&path)
        .assert()
}

fn assert_stdout(program: &str, expected: &str) {
    run_source(program)
        .success()
        .stdout(predicate::str::diff(format!("{expected}\n")));
}

#[test]
fn hello_world() {
    assert_stdout(
        "maan naam = \"Duniya\"\nlikho(\"Namaste, \" + naam + \"!\")",
        "Namaste, Duniya!",
    );
}

#[test]
fn arithmetic_and_shadowing() {
    assert_stdout(
        "maan x = 10\n{ maan x = x + 5  likho(x) }\nlikho(x)",
        "15\n10",
    );
}

#[test]
fn panic_mode_lexer_and_parser_report_both_errors_and_skip_interpreter() {
    let program = "maan x = @\nlikho(\"ok\"\nlikho(\"done\")";
    run_source(program)
        .failure()
        .stderr(predicate::str::contains("LexerError"))
        .stderr(predicate::str::contains("ParserError"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn closure_capture() {
    assert_stdout(
        "kaam make_adder(n) { wapas lambda(x) -> x + n }\nmaan add5 = make_adder(5)\nlikho(add5(3))",
        "8",
    );
}

#[test]
fn inheritance_and_super() {
    let program = "class A { kaam __init__(n) { yeh.n = n } kaam who() { likho(\"A:\" + str(yeh.n)) } }\n\
class B extends A { kaam __init__(n) { upar(n) } }\n\
maan b = naya B(7)\n\
b.who()";
    assert_stdout(program, "A:7");
}

#[test]
fn try_catch_finally_with_throw() {
    let program = "koshish { uchalo \"boom\" } pakad e { likho(\"caught:\" + e) } aakhir { likho(\"fin\") }";
    assert_stdout(program, "caught:boom\nfin");
}

#[test]
fn empty_source_runs_cleanly_with_no_output() {
    run_source("").success().stdout(predicate::str::is_empty());
}

#[test]
fn unterminated_string_reports_one_lex_error_and_continues() {
    let program = "maan x = \"oops\nlikho(\"after\")";
    run_source(program)
        .failure()
        .stderr(predicate::str::contains("LexerError"));
}

#[test]
fn missing_closing_brace_reports_parser_error() {
    let program = "jab_tak maan_hai { likho(1)";
    run_source(program).failure().stderr(
        predicate::str::contains("ParserError").or(predicate::str::contains("expected")),
    );
}

#[test]
fn break_outside_loop_is_a_semantic_error() {
    let program = "ruk";
    run_source(program)
        .failure()
        .stderr(predicate::str::contains("SemanticError"));
}

#[test]
fn yeh_outside_method_is_a_semantic_error() {
    let program = "likho(yeh)";
    run_source(program)
        .failure()
        .stderr(predicate::str::contains("SemanticError"));
}

#[test]
fn division_by_zero_is_a_runtime_error_not_silent_nan() {
    let program = "likho(1 / 0)";
    run_source(program)
        .failure()
        .stderr(predicate::str::contains("DivisionByZeroError"));
}

#[test]
fn recursion_past_depth_limit_is_a_runtime_error() {
    let program = "kaam loop_forever() { wapas loop_forever() }\nlikho(loop_forever())";
    run_source(program)
        .failure()
        .stderr(predicate::str::contains("RecursionError"));
}

#[test]
fn break_exits_only_the_innermost_loop() {
    let program = "maan i = 0\njab_tak i < 3 {\n  maan j = 0\n  jab_tak j < 3 {\n    agar j == 1 { ruk }\n    likho(j)\n    j = j + 1\n  }\n  i = i + 1\n}";
    assert_stdout(program, "0\n0\n0");
}

#[rstest]
#[case("6 + 7", "13")]
#[case("20 - 7", "13")]
#[case("91 / 7", "13")]
#[case("91 % 26", "13")]
#[case("6.5 + 6.5", "13")]
fn arithmetic_operators_evaluate_correctly(#[case] expr: &str, #[case] expected: &str) {
    assert_stdout(&format!("likho({expr})"), expected);
}

#[rstest]
#[case("6 > 5", "sach")]
#[case("5 > 6", "jhoot")]
#[case("5 >= 5", "sach")]
#[case("5 <= 4", "jhoot")]
#[case("5 == 5", "sach")]
#[case("5 != 5", "jhoot")]
fn comparison_operators_evaluate_correctly(#[case] expr: &str, #[case] expected: &str) {
    assert_stdout(&format!("likho({expr})"), expected);
}

#[test]
fn tokens_subcommand_ends_with_eof() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.hn");
    fs::write(&path, "maan x = 1").unwrap();
    Command::cargo_bin("hindustani")
        .unwrap()
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("EOF"));
}

/// Per spec §6, phase 4 (IR dump) and phase 5 (interpreter) are gated
/// independently: the `ir` subcommand requests phase 4, but phase 5 still
/// runs because phases 1-3 produced no errors, so both the dump and the
/// program's own stdout appear together.
#[test]
fn ir_subcommand_also_runs_the_program_when_source_is_clean() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.hn");
    fs::write(&path, "likho(\"hi\")").unwrap();
    Command::cargo_bin("hindustani")
        .unwrap()
        .arg("ir")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("PRINT"))
        .stdout(predicate::str::contains("hi"));
}
