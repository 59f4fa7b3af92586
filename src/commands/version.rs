//! Command: print version information.

/// Version baked in by `build.rs`, falling back to the package version.
#[must_use]
pub fn current() -> &'static str {
    option_env!("BREW_RECONCILE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the brew-reconcile version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("brew-reconcile {}", current());
}
