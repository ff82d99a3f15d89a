//! End-to-end pipeline tests over the fixture directories

use expect_test::{expect, expect_file};
use integration_tests::{Fixture, all_fixtures, error_chain};
use vp_driver::{Pipeline, PipelineConfig, Stage, preprocess};

fn check_fixture(name: &str) {
    let fixture = Fixture::load(name).unwrap();
    let actual = fixture.run().unwrap();
    expect_file![fixture.expected_path()].assert_eq(&actual);
}

#[test]
fn test_macros_fixture() {
    check_fixture("macros");
}

#[test]
fn test_modules_fixture() {
    check_fixture("modules");
}

#[test]
fn test_flatten_fixture() {
    check_fixture("flatten");
}

#[test]
fn test_full_fixture() {
    check_fixture("full");
}

#[test]
fn test_every_fixture_is_idempotent() {
    let names = all_fixtures().unwrap();
    assert_eq!(names, ["flatten", "full", "macros", "modules"]);
    for name in &names {
        let fixture = Fixture::load(name).unwrap();
        let once = fixture.run().unwrap();
        let twice = fixture.run_on(&once).unwrap();
        assert_eq!(once, twice, "fixture `{name}` is not idempotent");
    }
}

#[test]
fn test_comment_survives_every_stage() {
    let source = "// `W m[1] module m(a, b); reg [1:0] m [1:0];\nreg [1:0] m [1:0];\n";
    let output = preprocess(source).unwrap();
    assert!(output.starts_with("// `W m[1] module m(a, b); reg [1:0] m [1:0];\n"));
    assert!(output.contains("reg [1:0] m_1;"));
}

#[test]
fn test_both_bound_orders_flatten_alike() {
    let ascending = preprocess("reg [7:0] m [0:3];\n").unwrap();
    let descending = preprocess("reg [7:0] m [3:0];\n").unwrap();
    assert_eq!(ascending, descending);
    expect![[r#"
        reg [7:0] m_0;
        reg [7:0] m_1;
        reg [7:0] m_2;
        reg [7:0] m_3;

    "#]]
    .assert_eq(&ascending);
}

#[test]
fn test_reference_rewrites() {
    let source = "wire [0:0] m [3:0];\nassign a = m[1+1];\nassign b = m[x];\nassign c = mx[2];\n";
    let output = preprocess(source).unwrap();
    expect![[r#"
        wire [0:0] m_0;
        wire [0:0] m_1;
        wire [0:0] m_2;
        wire [0:0] m_3;

        assign a = m_2;
        assign b = m[x];
        assign c = mx[2];
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_stop_after_each_stage() {
    let source = "`define N 2\nmodule t(a, b);\nwire [1:0] w [`N-1:0];\n";
    let run = |stage: Stage| {
        let mut config = PipelineConfig::default();
        config.pipeline.stop_after = stage;
        Pipeline::new(config).run(source).unwrap().text
    };

    expect![[r#"
        module t(a, b);
        wire [1:0] w [2-1:0];
    "#]]
    .assert_eq(&run(Stage::Macros));
    expect![[r#"
        module t(a,
        b);
        wire [1:0] w [2-1:0];
    "#]]
    .assert_eq(&run(Stage::Modules));
    expect![[r#"
        module t(a,
        b);
        wire [1:0] w_0;
        wire [1:0] w_1;

    "#]]
    .assert_eq(&run(Stage::Flatten));
}

#[test]
fn test_fatal_errors() {
    let message = |source: &str| error_chain(&preprocess(source).unwrap_err());

    expect!["macro expansion failed: macro `W` has not been defined"].assert_eq(&message("`W\n"));
    expect!["macro expansion failed: macro `F` takes 1 argument(s) but 2 were given"]
        .assert_eq(&message("`define F(x) x\n`F(1, 2)\n"));
    expect!["module redeclaration failed: malformed port list for module `top`: expected `(` to open a list, found `;`"]
        .assert_eq(&message("module top;\n"));
    expect!["wire flattening failed: cannot evaluate dimension bound: `N` is not a constant"]
        .assert_eq(&message("reg [7:0] m [N:0];\n"));
    expect!["wire flattening failed: cannot evaluate index of `m`: division by zero"]
        .assert_eq(&message("reg [7:0] m [1:0];\nassign a = m[1/0];\n"));
}
