//! Change report output types.

use serde::{Deserialize, Serialize};

/// Classification of a state change, ordered by severity.
///
/// The derived `Ord` is what makes scope escalation monotonic:
/// `escalate` takes the max of the current and proposed scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ChangeScope {
    /// No difference between the compared states
    None,
    /// Price-affecting difference that does not change the scope of work
    Minor,
    /// Scope-of-work difference (or missing comparison data)
    Major,
}

impl std::fmt::Display for ChangeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeScope::None => write!(f, "none"),
            ChangeScope::Minor => write!(f, "minor"),
            ChangeScope::Major => write!(f, "major"),
        }
    }
}

/// Classified diff between two calculation snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    /// Highest severity reached while diffing
    pub scope: ChangeScope,

    /// Human-readable deltas, in detection order
    pub details: Vec<String>,

    /// True if any delta affects the computed price
    pub affects_price: bool,

    /// True if any delta changes the scope of work (service sets)
    pub affects_scope: bool,
}

impl ChangeReport {
    /// Report for two identical states.
    pub fn unchanged() -> Self {
        Self {
            scope: ChangeScope::None,
            details: Vec::new(),
            affects_price: false,
            affects_scope: false,
        }
    }

    /// Raise the scope to at least `scope`. Never downgrades.
    pub fn escalate(&mut self, scope: ChangeScope) {
        self.scope = self.scope.max(scope);
    }

    /// Record a human-readable delta.
    pub fn note(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_ordering() {
        assert!(ChangeScope::None < ChangeScope::Minor);
        assert!(ChangeScope::Minor < ChangeScope::Major);
    }

    #[test]
    fn test_escalate_never_downgrades() {
        let mut report = ChangeReport::unchanged();
        report.escalate(ChangeScope::Major);
        report.escalate(ChangeScope::Minor);
        assert_eq!(report.scope, ChangeScope::Major);
    }

    #[test]
    fn test_scope_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&ChangeScope::Major).unwrap(), "\"major\"");
        assert_eq!(serde_json::to_string(&ChangeScope::None).unwrap(), "\"none\"");
    }
}
