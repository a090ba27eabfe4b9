use std::path::Path;
use std::process::Command;

/// Run a command and return its trimmed stdout if it succeeded.
fn output_of(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    let sha = output_of("git", &["rev-parse", "--short", "HEAD"]);
    println!(
        "cargo:rustc-env=BUILD_GIT_SHA={}",
        sha.as_deref().unwrap_or("unknown")
    );

    // `git diff --quiet` exits 1 only when the tree has changes
    let dirty = sha.is_some()
        && Command::new("git")
            .args(["diff", "--quiet"])
            .status()
            .is_ok_and(|s| s.code() == Some(1));
    println!(
        "cargo:rustc-env=BUILD_GIT_DIRTY={}",
        if dirty { "-dirty" } else { "" }
    );

    let date = output_of("date", &["-u", "+%Y-%m-%d"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={date}");

    if Path::new(".git").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
        println!("cargo:rerun-if-changed=.git/refs");
    } else {
        println!("cargo:rerun-if-changed=build.rs");
    }
}
