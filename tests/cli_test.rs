#![allow(missing_docs)]

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn claude_workspace() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_claude-workspace"));
    cmd.env_remove("CLAUDE_CWD").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn entries_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

/// Wait for `child` to exit, killing it and failing the test after `timeout`.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> ExitStatus {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if start.elapsed() > timeout {
            let _ = child.kill();
            panic!("process did not exit within {timeout:?}");
        }
        thread::sleep(Duration::from_millis(20));
    }
}

/// Start `hold` with an isolated temp root, read the announced path, send
/// `signal`, and return the path and exit status.
#[cfg(unix)]
fn hold_until(signal: &str, temp_root: &Path) -> (String, ExitStatus) {
    let mut child = claude_workspace()
        .env("TMPDIR", temp_root)
        .arg("hold")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut line = String::new();
    BufReader::new(child.stdout.take().unwrap())
        .read_line(&mut line)
        .unwrap();
    let path = line.trim().to_string();
    assert!(Path::new(&path).is_dir(), "workspace should exist while held");

    let killed = Command::new("kill")
        .arg(format!("-{signal}"))
        .arg(child.id().to_string())
        .status()
        .unwrap();
    assert!(killed.success());

    let status = wait_with_timeout(&mut child, Duration::from_secs(10));
    (path, status)
}

#[test]
fn test_resolve_prints_explicit_dir() {
    let dir = TempDir::new().unwrap();
    let output = claude_workspace()
        .arg("resolve")
        .arg("--cwd")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), dir.path().display().to_string());
}

#[test]
fn test_resolve_reads_claude_cwd() {
    let dir = TempDir::new().unwrap();
    let output = claude_workspace()
        .env("CLAUDE_CWD", dir.path())
        .args(["resolve", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "environment");
    assert_eq!(json["is_temporary"], false);
    assert_eq!(json["path"], dir.path().to_str().unwrap());
}

#[test]
fn test_resolve_explicit_overrides_claude_cwd() {
    let explicit = TempDir::new().unwrap();
    let env_dir = TempDir::new().unwrap();
    let output = claude_workspace()
        .env("CLAUDE_CWD", env_dir.path())
        .arg("resolve")
        .arg("--cwd")
        .arg(explicit.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), explicit.path().display().to_string());
}

#[test]
fn test_resolve_missing_dir_fails() {
    let output = claude_workspace()
        .args(["resolve", "--cwd", "/this/directory/does/not/exist/12345"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn test_resolve_temporary_is_removed_without_keep() {
    let output = claude_workspace().arg("resolve").output().unwrap();

    assert!(output.status.success());
    let path = stdout_of(&output);
    assert!(path.contains("claude_code_workspace_"));
    assert!(!Path::new(&path).exists());
}

#[test]
fn test_resolve_keep_leaves_temporary() {
    let output = claude_workspace()
        .args(["resolve", "--keep"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let path = stdout_of(&output);
    assert!(Path::new(&path).is_dir());
    std::fs::remove_dir_all(&path).unwrap();
}

#[test]
fn test_list_and_prune_with_temp_root() {
    let root = TempDir::new().unwrap();
    let ws = root.path().join("claude_code_workspace_cli");
    std::fs::create_dir(&ws).unwrap();

    let listed = claude_workspace()
        .arg("list")
        .arg("--temp-root")
        .arg(root.path())
        .output()
        .unwrap();
    assert!(listed.status.success());
    assert_eq!(stdout_of(&listed), ws.display().to_string());

    let pruned = claude_workspace()
        .args(["prune", "--json", "--older-than", "0", "--temp-root"])
        .arg(root.path())
        .output()
        .unwrap();
    assert!(pruned.status.success());
    let report: serde_json::Value = serde_json::from_slice(&pruned.stdout).unwrap();
    assert_eq!(report["removed"][0], ws.to_str().unwrap());
    assert_eq!(report["dry_run"], false);
    assert!(!ws.exists());
}

#[test]
fn test_prune_default_age_spares_fresh_workspace() {
    let root = TempDir::new().unwrap();
    let ws = root.path().join("claude_code_workspace_recent");
    std::fs::create_dir(&ws).unwrap();

    let pruned = claude_workspace()
        .args(["prune", "--json", "--temp-root"])
        .arg(root.path())
        .output()
        .unwrap();
    assert!(pruned.status.success());
    let report: serde_json::Value = serde_json::from_slice(&pruned.stdout).unwrap();
    assert_eq!(report["removed"].as_array().unwrap().len(), 0);
    assert_eq!(report["skipped"][0], ws.to_str().unwrap());
    assert!(ws.exists());
}

#[cfg(unix)]
#[test]
fn test_hold_releases_workspace_on_sigint() {
    let root = TempDir::new().unwrap();
    let (path, status) = hold_until("INT", root.path());

    assert!(status.success(), "hold exited with {status:?}");
    assert!(path.contains("claude_code_workspace_"));
    assert!(!Path::new(&path).exists());
    assert_eq!(entries_in(root.path()), 0);
}

#[cfg(unix)]
#[test]
fn test_hold_releases_workspace_on_sigterm() {
    let root = TempDir::new().unwrap();
    let (path, status) = hold_until("TERM", root.path());

    assert!(status.success(), "hold exited with {status:?}");
    assert!(!Path::new(&path).exists());
}

/// A temporary workspace whose path cannot be printed is removed before
/// the command fails.
#[cfg(unix)]
#[test]
fn test_resolve_unprintable_workspace_is_released() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = TempDir::new().unwrap();
    let bad_root = root.path().join(OsStr::from_bytes(b"bad\xff"));
    std::fs::create_dir(&bad_root).unwrap();

    let output = claude_workspace()
        .env("TMPDIR", &bad_root)
        .args(["resolve", "--json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(entries_in(&bad_root), 0, "workspace leaked");
}

#[test]
fn test_resolve_closed_stdout_releases_workspace() {
    let root = TempDir::new().unwrap();
    let mut child = claude_workspace()
        .env("TMPDIR", root.path())
        .arg("resolve")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    drop(child.stdout.take());

    // Exit status depends on whether the write raced the close; either way
    // nothing may be left behind
    wait_with_timeout(&mut child, Duration::from_secs(10));
    assert_eq!(entries_in(root.path()), 0, "workspace leaked");
}
