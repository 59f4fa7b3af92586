//! Classification of install attempts.
//!
//! The manager does not reliably exit zero when there is nothing to do, so
//! a failed install whose output carries one of the benign markers counts
//! as already satisfied. Matching is a case-insensitive substring search
//! over stdout and stderr combined.
use super::InstallOutcome;

/// Output fragments that mean "already satisfied" despite a non-zero exit.
pub const DEFAULT_BENIGN_MARKERS: [&str; 5] = [
    "already installed",
    "already exists",
    "is already installed",
    "latest version already installed",
    "already been downloaded",
];

/// Table of benign markers, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenignMarkers {
    markers: Vec<String>,
}

impl Default for BenignMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_BENIGN_MARKERS)
    }
}

impl BenignMarkers {
    /// A table holding exactly `markers`. Empty entries are dropped.
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self {
            markers: Vec::new(),
        };
        table.extend(markers);
        table
    }

    /// The default table plus `extra`.
    #[must_use]
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(extra);
        self
    }

    fn extend<I, S>(&mut self, markers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for marker in markers {
            let marker = marker.as_ref().trim().to_lowercase();
            if !marker.is_empty() && !self.markers.contains(&marker) {
                self.markers.push(marker);
            }
        }
    }

    /// The markers, lower-cased, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.markers
    }

    /// Whether `output` contains any marker, ignoring case.
    #[must_use]
    pub fn matches(&self, output: &str) -> bool {
        let haystack = output.to_lowercase();
        self.markers.iter().any(|m| haystack.contains(m.as_str()))
    }
}

/// Classify an install attempt from its exit code and combined output.
///
/// Exit code zero is [`InstallOutcome::Installed`]. Otherwise a benign
/// marker anywhere in the output gives [`InstallOutcome::BenignDuplicate`],
/// and anything else is [`InstallOutcome::Failed`].
#[must_use]
pub fn classify(exit_code: i32, combined_output: &str, markers: &BenignMarkers) -> InstallOutcome {
    if exit_code == 0 {
        InstallOutcome::Installed
    } else if markers.matches(combined_output) {
        InstallOutcome::BenignDuplicate
    } else {
        InstallOutcome::Failed
    }
}
