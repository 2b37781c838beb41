use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const START: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

fn converted_catalog(tmp: &TempDir) -> std::path::PathBuf {
    let input = tmp.path().join("openingBook.json");
    fs::write(
        &input,
        format!(
            r#"[{{"name": "Yagura", "moves": {{
                "{START}": [{{"from": "77", "to": "76"}}, {{"from": "88", "to": "77"}}]
            }}}}]"#
        ),
    )
    .unwrap();
    Command::cargo_bin("convert_opening_book")
        .expect("binary exists")
        .arg(&input)
        .arg("-o")
        .arg(tmp.path())
        .assert()
        .success();
    tmp.path().join("opening_book.json")
}

#[test]
fn prints_report_for_converted_catalog() {
    let tmp = TempDir::new().unwrap();
    let catalog = converted_catalog(&tmp);

    Command::cargo_bin("verify_opening_book")
        .expect("binary exists")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Opening Book Migration Report ==="))
        .stdout(predicate::str::contains("Total Moves: 2"))
        .stdout(predicate::str::contains("Yagura: 2 moves"));
}

#[test]
fn json_output_is_parseable() {
    let tmp = TempDir::new().unwrap();
    let catalog = converted_catalog(&tmp);

    let output = Command::cargo_bin("verify_opening_book")
        .expect("binary exists")
        .arg(&catalog)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_positions"], 1);
    assert_eq!(stats["total_moves"], 2);
}

#[test]
fn rejects_tampered_catalog() {
    let tmp = TempDir::new().unwrap();
    let catalog = converted_catalog(&tmp);
    let text = fs::read_to_string(&catalog).unwrap();
    fs::write(&catalog, text.replacen("\"version\": 1", "\"version\": 99", 1)).unwrap();

    Command::cargo_bin("verify_opening_book")
        .expect("binary exists")
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
