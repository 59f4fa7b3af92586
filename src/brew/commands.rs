//! Command lines sent to the package manager, and validation of the
//! identifiers interpolated into them.
use crate::error::DirectiveError;
use crate::exec::CommandSpec;

use super::{PackageKind, PackageRequest};

/// Manager executable used when none is configured.
pub const DEFAULT_MANAGER: &str = "brew";

/// Official Homebrew install script.
pub const DEFAULT_INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/master/install.sh";

/// Repository tapped to enable cask support.
pub const DEFAULT_CASK_TAP: &str = "caskroom/cask";

/// Characters allowed in formula, cask and tap names besides ASCII alphanumerics.
const NAME_PUNCTUATION: &[char] = &['@', '.', '_', '+', '-', '/'];

fn reject(value: &str, reason: &str) -> DirectiveError {
    DirectiveError::InvalidIdentifier {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Check a formula, cask or tap name before it is placed on a command line.
///
/// # Errors
///
/// Returns [`DirectiveError::InvalidIdentifier`] for empty names, names that
/// would be parsed as an option, and names containing anything other than
/// ASCII alphanumerics and `@ . _ + - /`.
pub fn validate_name(value: &str) -> Result<(), DirectiveError> {
    if value.is_empty() {
        return Err(reject(value, "empty name"));
    }
    if value.starts_with('-') {
        return Err(reject(value, "must not start with '-'"));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !NAME_PUNCTUATION.contains(c))
    {
        return Err(reject(value, &format!("unexpected character {bad:?}")));
    }
    Ok(())
}

/// Check a Brewfile path before it is placed on a command line.
///
/// Paths are passed as a single argument, so only option-like and control
/// characters are rejected.
///
/// # Errors
///
/// Returns [`DirectiveError::InvalidIdentifier`] for empty paths, paths
/// starting with `-`, and paths containing control characters.
pub fn validate_path(value: &str) -> Result<(), DirectiveError> {
    if value.is_empty() {
        return Err(reject(value, "empty path"));
    }
    if value.starts_with('-') {
        return Err(reject(value, "must not start with '-'"));
    }
    if value.chars().any(char::is_control) {
        return Err(reject(value, "contains a control character"));
    }
    Ok(())
}

/// Split a tap entry into its name and optional clone URL.
///
/// An entry is either `user/repo` or `user/repo https://host/repo.git`,
/// mirroring the two forms `brew tap` accepts. Each part becomes its own
/// argument, so the remote only has to be an `https://` URL free of
/// whitespace and control characters.
///
/// # Errors
///
/// Returns [`DirectiveError::InvalidIdentifier`] if the name fails
/// [`validate_name`], the remote is not `https://`, or the entry has more
/// than two parts.
pub fn parse_tap(entry: &str) -> Result<(&str, Option<&str>), DirectiveError> {
    let mut parts = entry.split_whitespace();
    let name = parts.next().unwrap_or_default();
    validate_name(name)?;
    let remote = parts.next();
    if parts.next().is_some() {
        return Err(reject(entry, "expected 'user/repo' or 'user/repo <https-url>'"));
    }
    if let Some(url) = remote {
        if !url.starts_with("https://") || url.len() == "https://".len() {
            return Err(reject(url, "tap remote must be an https:// URL"));
        }
        if url.chars().any(char::is_control) {
            return Err(reject(url, "contains a control character"));
        }
    }
    Ok((name, remote))
}

/// `<manager> tap <name> [<remote>]`
#[must_use]
pub fn tap(manager: &str, name: &str, remote: Option<&str>) -> CommandSpec {
    let cmd = CommandSpec::new(manager).args(["tap", name]);
    match remote {
        Some(url) => cmd.arg(url),
        None => cmd,
    }
}

/// `<manager> install <id>` or `<manager> install --cask <id>`
#[must_use]
pub fn install(manager: &str, request: &PackageRequest) -> CommandSpec {
    let cmd = CommandSpec::new(manager).arg("install");
    let cmd = match request.kind {
        PackageKind::Formula => cmd,
        PackageKind::Cask => cmd.arg("--cask"),
    };
    cmd.arg(request.id.as_str())
}

/// `<manager> ls --versions <id>`: exits zero only if the formula is installed.
#[must_use]
pub fn formula_versions(manager: &str, id: &str) -> CommandSpec {
    CommandSpec::new(manager).args(["ls", "--versions", id])
}

/// `<manager> list --cask <id>`
#[must_use]
pub fn cask_list(manager: &str, id: &str) -> CommandSpec {
    CommandSpec::new(manager).args(["list", "--cask", id])
}

/// `<manager> info --cask <id>`
#[must_use]
pub fn cask_info(manager: &str, id: &str) -> CommandSpec {
    CommandSpec::new(manager).args(["info", "--cask", id])
}

/// `<manager> bundle --file=<path>`
#[must_use]
pub fn bundle(manager: &str, path: &str) -> CommandSpec {
    CommandSpec::new(manager).args(["bundle".to_string(), format!("--file={path}")])
}

/// `<manager> update`
#[must_use]
pub fn update(manager: &str) -> CommandSpec {
    CommandSpec::new(manager).arg("update")
}

/// Fetch and run the remote install script through the shell.
///
/// `url` comes from validated settings and is the only value interpolated
/// into a shell script anywhere in the engine.
#[must_use]
pub fn install_script(url: &str) -> CommandSpec {
    CommandSpec::shell(format!("/bin/bash -c \"$(curl -fsSL {url})\"")).env("NONINTERACTIVE", "1")
}
