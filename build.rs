//! Writes `build_info.rs` into `OUT_DIR` for the `--version` banner.
//!
//! `BUILD_COMMIT` and `BUILD_DATE` override the values probed from git and the
//! clock.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Trimmed stdout of a successful git invocation.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn commit() -> String {
    if let Ok(commit) = env::var("BUILD_COMMIT") {
        return commit;
    }
    match git(&["rev-parse", "--short=7", "HEAD"]).filter(|s| !s.is_empty()) {
        Some(hash) => {
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|s| !s.is_empty());
            if dirty {
                format!("{hash}-dirty")
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    }
}

fn main() {
    let commit = commit();
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let Ok(out_dir) = env::var("OUT_DIR") else {
        panic!("OUT_DIR is not set; build scripts run under cargo");
    };
    let contents = format!(
        "pub const BUILD_COMMIT: &str = {commit:?};\n\
         pub const BUILD_DATE: &str = {date:?};\n\
         pub const BUILD_PROFILE: &str = {profile:?};\n"
    );
    if let Err(err) = fs::write(Path::new(&out_dir).join("build_info.rs"), contents) {
        panic!("writing build_info.rs: {err}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
