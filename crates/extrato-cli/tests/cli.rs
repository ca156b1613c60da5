use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn extrato() -> Command {
    Command::cargo_bin("extrato").unwrap()
}

#[test]
fn help_lists_subcommands() {
    extrato()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("text"));
}

#[test]
fn config_init_then_get_and_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let path = path.to_str().unwrap();

    extrato()
        .args(["--config", path, "config", "init"])
        .assert()
        .success();

    extrato()
        .args(["--config", path, "config", "get", "export.sheet_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Dados\""));

    extrato()
        .args(["--config", path, "config", "set", "processing.default_layout", "bb"])
        .assert()
        .success();

    extrato()
        .args(["--config", path, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default_layout\": \"bb\""));

    // second init without --force refuses to overwrite
    extrato()
        .args(["--config", path, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_set_rejects_unknown_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    extrato()
        .args(["--config", path.to_str().unwrap(), "config", "set", "processing.default_layout", "itau"])
        .assert()
        .failure();
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = format!("{}/*.pdf", dir.path().display());

    extrato()
        .args(["batch", &pattern, "--layout", "caixa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF files"));
}

#[test]
fn batch_turns_unreadable_pdfs_into_error_rows() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pdf"), b"not a pdf").unwrap();
    fs::write(dir.path().join("b.pdf"), b"also not a pdf").unwrap();
    let pattern = format!("{}/*.pdf", dir.path().display());

    extrato()
        .args(["batch", &pattern, "--layout", "padrao2", "--format", "csv", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Arquivo,Conta,Saldo Anterior,Rendimento,Saldo Atual"))
        .stdout(predicate::str::contains("a.pdf,"))
        .stdout(predicate::str::contains("b.pdf,"))
        .stdout(predicate::str::contains("Erro:"))
        .stderr(predicate::str::contains("Failed files:"));
}

#[test]
fn batch_writes_xlsx_to_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pdf"), b"not a pdf").unwrap();
    let pattern = format!("{}/*.pdf", dir.path().display());
    let output = dir.path().join("out").join("saldos.xlsx");

    extrato()
        .args(["batch", &pattern, "--layout", "bb", "-o", output.to_str().unwrap()])
        .assert()
        .success();

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn batch_rejects_unknown_layout() {
    extrato()
        .args(["batch", "*.pdf", "--layout", "itau"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown statement layout"));
}

#[test]
fn text_reports_missing_file() {
    extrato()
        .args(["text", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
