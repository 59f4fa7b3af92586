//! Reconciliation engine driving the Homebrew CLI as an external process.
//!
//! - **[`bootstrap`]** — make sure the manager (and its cask tap) exist
//! - **[`presence`]** — ask the manager whether a formula or cask is installed
//! - **[`classify`]** — turn an install exit code plus output into an outcome
//! - **[`reconcile`]** — check, install, classify for each requested package
//! - **[`tap`]** / **[`bundle`]** — fail-fast batches of taps and Brewfiles
pub mod bootstrap;
pub mod bundle;
pub mod classify;
pub mod commands;
pub mod presence;
pub mod reconcile;
pub mod tap;

use std::fmt;

pub use bootstrap::BootstrapManager;
pub use bundle::BundleInstaller;
pub use classify::{BenignMarkers, classify};
pub use presence::PresenceChecker;
pub use reconcile::InstallReconciler;
pub use tap::{TapBatchResult, TapManager};

/// Which kind of unit a package identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    /// Command-line package.
    Formula,
    /// macOS application.
    Cask,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Cask => write!(f, "cask"),
        }
    }
}

/// One package to ensure. Identity is `(kind, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRequest {
    /// Formula or cask.
    pub kind: PackageKind,
    /// Name as passed to the manager.
    pub id: String,
}

impl PackageRequest {
    /// A formula request.
    #[must_use]
    pub fn formula(id: impl Into<String>) -> Self {
        Self {
            kind: PackageKind::Formula,
            id: id.into(),
        }
    }

    /// A cask request.
    #[must_use]
    pub fn cask(id: impl Into<String>) -> Self {
        Self {
            kind: PackageKind::Cask,
            id: id.into(),
        }
    }

    /// Requests of one kind for every identifier in `ids`, in order.
    #[must_use]
    pub fn all(kind: PackageKind, ids: &[String]) -> Vec<Self> {
        ids.iter()
            .map(|id| Self {
                kind,
                id: id.clone(),
            })
            .collect()
    }
}

impl fmt::Display for PackageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.kind)
    }
}

/// Terminal state of reconciling one [`PackageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The presence check found it; no install was attempted.
    AlreadyPresent,
    /// The install command exited zero.
    Installed,
    /// The install command failed but its output says the package is
    /// already there.
    BenignDuplicate,
    /// The install command failed for real.
    Failed,
}

impl InstallOutcome {
    /// Everything except [`InstallOutcome::Failed`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Per-package outcomes of one batch, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// One entry per request.
    pub outcomes: Vec<(PackageRequest, InstallOutcome)>,
}

impl RunResult {
    /// `true` iff no request ended in [`InstallOutcome::Failed`].
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_success())
    }

    /// Requests that failed, in order.
    #[must_use]
    pub fn failures(&self) -> Vec<&PackageRequest> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .map(|(request, _)| request)
            .collect()
    }

    /// Outcome recorded for `id`, if it was part of the batch.
    #[must_use]
    pub fn outcome_of(&self, id: &str) -> Option<InstallOutcome> {
        self.outcomes
            .iter()
            .find(|(request, _)| request.id == id)
            .map(|(_, outcome)| *outcome)
    }
}
