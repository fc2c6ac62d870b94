//! Guard outcomes.

use crate::error::RuleViolation;
use serde::Serialize;

/// Outcome of evaluating one invocation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// No rule fired.
    Allow,
    /// A rule fired; the caller must not run the tool.
    Block(RuleViolation),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// The violation behind a block.
    pub fn violation(&self) -> Option<&RuleViolation> {
        match self {
            Decision::Allow => None,
            Decision::Block(violation) => Some(violation),
        }
    }
}

/// What the pre stage reports at the process boundary.
///
/// `Undecidable` covers input that could not be evaluated at all. It is kept
/// apart from [`Decision`] so the fail-open mapping happens in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Decided(Decision),
    Undecidable,
}

impl Verdict {
    /// Whether the caller may run the tool. Undecidable input is allowed.
    pub fn permits(&self) -> bool {
        match self {
            Verdict::Decided(decision) => decision.is_allow(),
            Verdict::Undecidable => true,
        }
    }

    pub fn violation(&self) -> Option<&RuleViolation> {
        match self {
            Verdict::Decided(decision) => decision.violation(),
            Verdict::Undecidable => None,
        }
    }
}

impl From<Decision> for Verdict {
    fn from(decision: Decision) -> Self {
        Verdict::Decided(decision)
    }
}
