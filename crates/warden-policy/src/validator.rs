//! The pre-invocation guard.
//!
//! The `Guard` is the entry point for deciding whether a tool call may run.
//! It holds an ordered table of [`Rule`]s:
//!
//! 1. **Sensitive file** - credentials file reads and writes
//! 2. **Destructive delete** - recursive forced `rm` near dangerous paths
//!
//! Every rule is evaluated for every record; the first rule in table order
//! that fires decides the block.

use crate::decision::Decision;
use crate::error::{PolicyError, RuleViolation};
use crate::rules::{DestructiveDeleteRule, Rule, SensitiveFileRule};
use warden_core::{GuardConfig, InvocationRecord};

/// Evaluates invocation records against the guard rules.
pub struct Guard {
    rules: Vec<Box<dyn Rule>>,
}

impl Guard {
    /// Build the guard described by the configuration.
    pub fn from_config(config: &GuardConfig) -> Result<Self, PolicyError> {
        let mut rules: Vec<Box<dyn Rule>> = vec![Box::new(SensitiveFileRule::new(config)?)];
        if config.destructive_delete {
            rules.push(Box::new(DestructiveDeleteRule::new(config)?));
        }
        Ok(Self { rules })
    }

    /// Build a guard from an explicit rule table.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Run every rule and collect the violations in table order.
    pub fn violations(&self, record: &InvocationRecord) -> Vec<RuleViolation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(record))
            .collect()
    }

    /// Decide whether the invocation may run.
    pub fn evaluate(&self, record: &InvocationRecord) -> Decision {
        let mut violations = self.violations(record).into_iter();

        let Some(first) = violations.next() else {
            tracing::debug!(
                tool = %record.tool(),
                session = %record.session_id(),
                "Invocation allowed"
            );
            return Decision::Allow;
        };

        for shadowed in violations {
            tracing::debug!(
                rule = %shadowed.kind,
                decided_by = %first.kind,
                "Rule also fired"
            );
        }

        tracing::debug!(
            rule = %first.kind,
            tool = %record.tool(),
            session = %record.session_id(),
            "Invocation blocked"
        );
        Decision::Block(first)
    }
}
