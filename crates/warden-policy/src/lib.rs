//! Warden Policy Enforcement
//!
//! Decides, per tool invocation, whether the agent may run it. Decisions are
//! made from pattern rules over shell command text and file paths; there is
//! no external policy engine.
//!
//! ```rust
//! use warden_core::{GuardConfig, InvocationRecord};
//! use warden_policy::{Decision, Guard};
//!
//! let guard = Guard::from_config(&GuardConfig::default()).unwrap();
//! let record = InvocationRecord::from_json(r#"{"tool":"Bash","command":"rm -rf ~"}"#).unwrap();
//! assert!(matches!(guard.evaluate(&record), Decision::Block(_)));
//! ```

pub mod decision;
pub mod error;
pub mod rules;
pub mod validator;

pub use decision::{Decision, Verdict};
pub use error::{PolicyError, RuleKind, RuleViolation};
pub use rules::{DestructiveDeleteRule, Rule, SensitiveFileRule};
pub use validator::Guard;
