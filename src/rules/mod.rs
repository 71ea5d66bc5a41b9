//! Charge determination for cross-border sales.
//!
//! [`ChargeRule`] implements the two directional decisions (sale *to* a
//! buyer in its jurisdiction, sale *from* a seller in it);
//! [`RuleRegistry`] dispatches a sale to the buyer's rule first and falls
//! back to the seller's rule.

mod charge;
mod registry;

pub use charge::{ChargeRule, Jurisdictions, RuleOutcome};
pub use registry::{RegistryBuilder, RuleRegistry};
