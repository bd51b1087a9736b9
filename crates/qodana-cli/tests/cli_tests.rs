//! Integration tests for the qodana-config binary.
//!
//! The resolver is replaced by a shell script passed as `--jre`; it receives
//! the same arguments `java` would and writes canned output files.

use assert_cmd::Command;
use predicates::prelude::*;
use qodana_test_utils::git::{head_branch, real_git_repo_with_commits};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "QODANA_PROJECT_DIR",
    "QODANA_JRE",
    "QODANA_SYSTEM_DIR",
    "QODANA_CONFIG_LOADER_CLI",
    "QODANA_GLOBAL_CONFIGS_FILE",
    "QODANA_GLOBAL_CONFIG_ID",
    "QODANA_LOG_DIR",
];

/// Get a Command for the qodana-config binary with a clean environment
fn qodana_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("qodana-config"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();
        fs::write(temp.path().join("loader.jar"), "jar").unwrap();
        Self { temp }
    }

    fn project(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    fn system(&self) -> PathBuf {
        self.temp.path().join("system")
    }

    /// Shell script standing in for `java -jar config-loader-cli.jar`.
    #[cfg(unix)]
    fn fake_jre(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.temp.path().join("fake-java");
        let content = format!(
            "#!/bin/sh\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"--effective-config-out-dir\" ]; then out=\"$2\"; fi\n  shift\ndone\n{body}\n"
        );
        fs::write(&script, content).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn resolve_args(&self, command: &str, project: &Path) -> Vec<String> {
        vec![
            command.to_string(),
            "--project-dir".into(),
            project.display().to_string(),
            "--system-dir".into(),
            self.system().display().to_string(),
            "--config-loader-cli".into(),
            self.temp.path().join("loader.jar").display().to_string(),
        ]
    }
}

const WRITE_EFFECTIVE: &str =
    "printf 'ide: QDPY\\n' > \"$out/effective.qodana.yaml\"\nprintf '{}' > \"$out/qodana-config.json\"";

#[test]
fn test_help_output() {
    qodana_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("revisions"));
}

#[test]
fn test_resolve_without_jre_fails() {
    let ws = Workspace::new();

    qodana_cmd()
        .args(ws.resolve_args("resolve", &ws.project()))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("JRE not found"));
}

#[test]
fn test_resolve_with_missing_loader_fails() {
    let ws = Workspace::new();
    fs::remove_file(ws.temp.path().join("loader.jar")).unwrap();

    qodana_cmd()
        .args(ws.resolve_args("resolve", &ws.project()))
        .args(["--jre", "/usr/bin/java"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config-loader-cli.jar not found"));
}

#[cfg(unix)]
#[test]
fn test_resolve_reports_effective_config() {
    let ws = Workspace::new();
    let jre = ws.fake_jre(WRITE_EFFECTIVE);

    qodana_cmd()
        .args(ws.resolve_args("resolve", &ws.project()))
        .arg("--jre")
        .arg(&jre)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded Qodana Configuration"))
        .stdout(predicate::str::contains("effective.qodana.yaml"));

    assert!(!ws.system().join("tools/config-loader-cli.jar").exists());
}

#[cfg(unix)]
#[test]
fn test_resolver_exit_code_is_passed_through() {
    let ws = Workspace::new();
    let jre = ws.fake_jre("exit 7");

    qodana_cmd()
        .args(ws.resolve_args("resolve", &ws.project()))
        .arg("--jre")
        .arg(&jre)
        .assert()
        .code(7)
        .stderr(predicate::str::contains("exited with code 7"));
}

#[cfg(unix)]
#[test]
fn test_mismatch_exits_with_remediation() {
    let ws = Workspace::new();
    fs::write(ws.project().join("qodana.yaml"), "ide: QDJVM\n").unwrap();
    let jre = ws.fake_jre(&format!(
        "{WRITE_EFFECTIVE}\nprintf 'ide: QDJVM\\n' > \"$out/qodana.yaml\""
    ));

    qodana_cmd()
        .args(ws.resolve_args("resolve", &ws.project()))
        .arg("--jre")
        .arg(&jre)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Add `ide: QDPY` to qodana.yaml"));
}

#[cfg(unix)]
#[test]
fn test_resolver_log_is_written() {
    let ws = Workspace::new();
    let jre = ws.fake_jre(WRITE_EFFECTIVE);
    let logs = ws.temp.path().join("logs");

    qodana_cmd()
        .args(ws.resolve_args("resolve", &ws.project()))
        .arg("--jre")
        .arg(&jre)
        .arg("--log-dir")
        .arg(&logs)
        .assert()
        .success();

    let log = fs::read_to_string(logs.join("config-loader-cli.log")).unwrap();
    assert!(log.contains("--effective-config-out-dir"));
}

#[test]
fn test_revisions_lists_oldest_first() {
    let ws = Workspace::new();
    let hashes = real_git_repo_with_commits(&ws.project(), 3);

    qodana_cmd()
        .args(["revisions", "--project-dir"])
        .arg(ws.project())
        .assert()
        .success()
        .stdout(format!("{}\n", hashes.join("\n")));
}

#[cfg(unix)]
#[test]
fn test_history_resolves_each_revision_and_returns_to_branch() {
    let ws = Workspace::new();
    real_git_repo_with_commits(&ws.project(), 2);
    let jre = ws.fake_jre(WRITE_EFFECTIVE);

    qodana_cmd()
        .args(ws.resolve_args("history", &ws.project()))
        .arg("--jre")
        .arg(&jre)
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 2 revision(s)"));

    assert_eq!(head_branch(&ws.project()).as_deref(), Some("main"));
}

#[test]
fn test_history_rejects_unknown_commit() {
    let ws = Workspace::new();
    real_git_repo_with_commits(&ws.project(), 1);

    qodana_cmd()
        .args(ws.resolve_args("history", &ws.project()))
        .args(["--commit", "0000000000000000000000000000000000000000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("0000000000000000000000000000000000000000"));
}
