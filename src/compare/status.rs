//! Resolution problems met during a comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which version of the API a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// One lookup that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionIssue {
    pub side: Side,
    pub component: String,
    pub type_name: String,
    pub message: String,
}

impl fmt::Display for ResolutionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} version, component {}): {}",
            self.type_name, self.side, self.component, self.message
        )
    }
}

/// Status reported alongside a comparison outcome.
///
/// A comparison never fails; inferences that needed an unavailable type fall
/// back to a conservative answer and the lookup is recorded here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonStatus {
    issues: Vec<ResolutionIssue>,
}

impl ComparisonStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn issues(&self) -> &[ResolutionIssue] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn record(
        &mut self,
        side: Side,
        component: &str,
        type_name: &str,
        message: impl Into<String>,
    ) {
        let issue = ResolutionIssue {
            side,
            component: component.to_string(),
            type_name: type_name.to_string(),
            message: message.into(),
        };
        tracing::warn!(%issue, "resolution failed");
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }
}
