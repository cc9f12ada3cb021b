//! Tests for `--rewrite-only`, which prints the rewritten module without running a generator.

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use common::{SAMPLE_MODULE, leftover_temp_modules, write_module};

#[test]
fn test_rewrite_stdin() {
    let input = "Foo is bar\n       @param tableName: name of new table\n       @type tableName: String\n       Blue is green\n";

    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only"]).write_stdin(input);

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Foo is bar\n       <b>tableName</b> (<b><i>String</i></b>): name of new table</br>\n       Blue is green\n"
    );
}

#[test]
fn test_rewrite_module_with_colon_delimiter() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let module = write_module(
        temp_dir.path(),
        "sphinx_doc.py",
        "def f():\n    '''\n    :returns: a number between 1 and 10\n    :rtype: int\n    '''\n",
    );

    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only", "--delimiter", ":"]).arg(&module);

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "def f():\n    '''\n    <b>returns</b> (<b><i>int</i></b>): a number between 1 and 10</br>\n    '''\n"
    );
    // No temporary module is involved in this mode
    assert!(leftover_temp_modules(temp_dir.path()).is_empty());
}

#[test]
fn test_rewrite_leaves_untagged_text_alone() {
    let input = "plain text\r\nwith @mentions and key: value pairs\n\n    indented\tline";

    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only"]).write_stdin(input);

    cmd.assert().success().stdout(input);
}

#[test]
fn test_rewrite_sample_module() {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let module = write_module(temp_dir.path(), "sample.py", SAMPLE_MODULE);

    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only", "--force-type-spec"]).arg(&module);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("@author: somebody"))
        .stdout(predicate::str::contains(
            "        <b>factor</b> (<b><i>float</i></b>): how much to scale by, as a multiple</br>\n",
        ))
        .stdout(predicate::str::contains("@type").not());
}

#[test]
fn test_rewrite_reports_type_without_param() {
    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only"])
        .write_stdin("Foo is bar\n    @type tableName: String\n");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("no matching parameter tag (line 2)"));
}

#[test]
fn test_rewrite_reports_param_type_mismatch() {
    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only", "--delimiter", ":"])
        .write_stdin(":param tableName: name of new table\n:type bluebell: String\n");

    cmd.assert().code(2).stderr(predicate::str::contains(
        "Type given for 'bluebell' does not match parameter 'tableName' (line 2)",
    ));
}

#[test]
fn test_invalid_delimiter_rejected_by_cli() {
    let mut cmd = cargo_bin_cmd!("pdoc-prep");
    cmd.args(["--no-config", "--rewrite-only", "--delimiter", "#"]);

    cmd.assert().failure().stderr(predicate::str::contains("Invalid delimiter '#'"));
}
