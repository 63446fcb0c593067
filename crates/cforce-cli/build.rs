//! Build script for cforce-cli.
//!
//! Embeds the commit and build date shown by `cforce --version`.

use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string())
}

fn main() {
    let hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=CFORCE_GIT_HASH={}", hash);

    let date = chrono::Utc::now().format("%Y-%m-%d");
    println!("cargo:rustc-env=CFORCE_BUILD_DATE={}", date);

    println!("cargo:rerun-if-changed=../../.git/HEAD");
}
