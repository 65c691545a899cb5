//! Remember the previous decision per record and report differences.
use std::collections::BTreeMap;

use crate::model::Server;
use crate::placement::{PlacementDecision, Resolution};

/// Identity of one installed record: lowercased id plus its server.
pub type DecisionKey = (String, Option<Server>);

/// A decision that differs from the previous evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionChange {
    /// A record seen for the first time.
    Added {
        /// Record identity.
        key: DecisionKey,
        /// Its decision.
        decision: PlacementDecision,
    },
    /// A record whose decision changed.
    Changed {
        /// Record identity.
        key: DecisionKey,
        /// Previous decision.
        before: PlacementDecision,
        /// New decision.
        after: PlacementDecision,
    },
    /// A record that disappeared from the inventory.
    Removed {
        /// Record identity.
        key: DecisionKey,
        /// Its last known decision.
        decision: PlacementDecision,
    },
}

impl DecisionChange {
    /// Identity of the affected record.
    #[must_use]
    pub const fn key(&self) -> &DecisionKey {
        match self {
            Self::Added { key, .. } | Self::Changed { key, .. } | Self::Removed { key, .. } => key,
        }
    }
}

/// Last decision per record.
#[derive(Debug, Default)]
pub struct DecisionTracker {
    last: BTreeMap<DecisionKey, PlacementDecision>,
}

impl DecisionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked state with `resolutions` and return the changes.
    ///
    /// Changes are ordered by key. Records whose decision compares equal to
    /// the previous one are not reported.
    pub fn update(&mut self, resolutions: &[Resolution<'_>]) -> Vec<DecisionChange> {
        let mut next = BTreeMap::new();
        for r in resolutions {
            let key = (r.extension.identifier.key(), r.extension.server);
            next.insert(key, r.decision.clone());
        }

        let mut changes = Vec::new();
        for (key, after) in &next {
            match self.last.remove(key) {
                None => changes.push(DecisionChange::Added {
                    key: key.clone(),
                    decision: after.clone(),
                }),
                Some(before) if before != *after => changes.push(DecisionChange::Changed {
                    key: key.clone(),
                    before,
                    after: after.clone(),
                }),
                Some(_) => {}
            }
        }
        for (key, decision) in std::mem::take(&mut self.last) {
            changes.push(DecisionChange::Removed { key, decision });
        }
        changes.sort_by(|a, b| a.key().cmp(b.key()));

        self.last = next;
        changes
    }
}
