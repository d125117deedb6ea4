//! Common utilities for CLI E2E tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// A temporary HOME plus a planner document path inside it.
pub struct Sandbox {
    pub home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn document(&self) -> PathBuf {
        self.home.path().join("plan.json")
    }

    /// Invoke a CLI command against this sandbox's document.
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let document = self.document();
        let mut full: Vec<&str> = vec!["--file", document.to_str().expect("utf-8 temp path")];
        full.extend_from_slice(args);
        run_cli(self.home.path(), &full)
    }

    /// Invoke a CLI command and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        if code != 0 && !stderr.is_empty() {
            eprintln!("CLI error output: {}", stderr);
        }
        assert_eq!(code, 0, "CLI command failed with code {}: {:?}", code, args);
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn run_failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {:?}", args);
        (stdout, stderr, code)
    }

    /// The current document as JSON.
    pub fn document_json(&self) -> serde_json::Value {
        parse_json(&self.run_success(&["show", "--json"]))
    }

    /// Drop `task` and return the new block's id.
    pub fn drop_task(&self, task: &str, offset_px: &str) -> String {
        let before = block_ids(&self.document_json());
        self.run_success(&["drop", task, offset_px]);
        block_ids(&self.document_json())
            .into_iter()
            .find(|id| !before.contains(id))
            .expect("dropped block not found")
    }
}

/// Invoke the CLI binary with HOME pointed at `home`.
pub fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_dayplanner"))
        .args(args)
        .env("HOME", home)
        .env_remove("DAYPLANNER_ENV")
        .env_remove("DAYPLANNER_LOG")
        .current_dir(home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

pub fn block_ids(document: &serde_json::Value) -> Vec<String> {
    document["blocks"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn find_block<'a>(document: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    document["blocks"]
        .as_array()
        .and_then(|blocks| blocks.iter().find(|b| b["id"] == id))
        .expect("block not in document")
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack, needle
    );
}
