//! Build script that embeds the crate version string.

use std::process::Command;

fn main() {
    // Prefer BREW_RECONCILE_VERSION if set (e.g., by a release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("BREW_RECONCILE_VERSION") {
        println!("cargo:rustc-env=BREW_RECONCILE_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=BREW_RECONCILE_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=BREW_RECONCILE_VERSION");
}
