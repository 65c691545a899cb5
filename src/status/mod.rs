//! Change tracking on top of the resolver.
//!
//! The resolver is stateless. [`DecisionTracker`] remembers the last
//! decision per record so callers can react only to what changed, and
//! [`StatusLabel`] turns inventory transitions into a short label.
mod label;
mod tracker;

pub use label::{ExtensionSnapshot, StatusLabel};
pub use tracker::{DecisionChange, DecisionKey, DecisionTracker};
