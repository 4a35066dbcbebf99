//! Stamps `WSEXPORT_BUILD_SHA` for `wsexport --version`.
//!
//! An explicit `WSEXPORT_BUILD_SHA` in the build environment wins (release
//! tarballs have no `.git`); otherwise the workspace's short HEAD is used.

use std::path::Path;
use std::process::Command;

const SHA_VAR: &str = "WSEXPORT_BUILD_SHA";

fn git_short_head(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    println!("cargo:rerun-if-env-changed={SHA_VAR}");

    let pinned = std::env::var(SHA_VAR).ok().filter(|s| !s.trim().is_empty());
    let sha = pinned.or_else(|| {
        let manifest = std::env::var("CARGO_MANIFEST_DIR").ok()?;
        let workspace = Path::new(&manifest).parent()?.to_path_buf();
        println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
        git_short_head(&workspace)
    });

    println!("cargo:rustc-env={SHA_VAR}={}", sha.as_deref().unwrap_or("dev"));
}
