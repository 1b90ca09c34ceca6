//! Pure policy evaluation (no IO).
//!
//! Input: a plane set constructed elsewhere plus a caller payload.
//! Output: rule outcomes, classified violations, canonical hashes.

#![forbid(unsafe_code)]

pub mod expr;
pub mod hash;
pub mod model;

mod engine;
mod resolver;

pub use engine::{
    check_required_metrics, classify, evaluate_rules, Classified, RuleOutcome, RuleStatus,
};
pub use resolver::{resolve, ResolutionSource, ResolvedContext};
