#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn spendwise_cmd() -> Command {
    let mut cmd = Command::cargo_bin("spendwise").unwrap();
    cmd.env_remove("SPENDWISE_ROOT");
    cmd.env_remove("SPENDWISE_MONTH_MATCH");
    cmd.env_remove("SPENDWISE_LOG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `spendwise init` in `dir`
pub fn init_ledger(dir: &Path) {
    spendwise_cmd().arg("init").arg(dir).assert().success();
}

/// Record a transaction in the ledger rooted at `dir`
pub fn add(dir: &Path, kind: &str, amount: &str, category: &str, date: &str) {
    spendwise_cmd()
        .current_dir(dir)
        .args([
            "add",
            "--kind",
            kind,
            "--amount",
            amount,
            "--category",
            category,
            "--date",
            date,
        ])
        .assert()
        .success();
}
