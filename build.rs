//! Injects `GENSH_BUILD_GIT_HASH` and `GENSH_BUILD_TIMESTAMP` for `build_info`.
//!
//! Either value can be pinned from the environment; otherwise they come from
//! git and the system clock, with `unknown` when git is unavailable.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const HASH_VAR: &str = "GENSH_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "GENSH_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Some(reference) = current_branch_ref() {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }
    for var in [HASH_VAR, TIMESTAMP_VAR] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let hash = pinned(HASH_VAR)
        .or_else(git_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = pinned(TIMESTAMP_VAR).unwrap_or_else(unix_timestamp);

    println!("cargo:rustc-env={HASH_VAR}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn pinned(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn current_branch_ref() -> Option<String> {
    let head = std::fs::read_to_string(".git/HEAD").ok()?;
    head.trim().strip_prefix("ref: ").map(str::to_string)
}

fn git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn unix_timestamp() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    format!("unix:{seconds}")
}
