use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let workspace = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(".."));

    println!("cargo:rustc-env=FAKTURA_BUILD_SHA={}", git_sha(&workspace).as_deref().unwrap_or("unknown"));
    println!("cargo:rerun-if-changed={}", workspace.join(".git").join("HEAD").display());
}

fn git_sha(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}
