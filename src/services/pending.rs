// SPDX-License-Identifier: MPL-2.0
//! Set of control units whose images are currently being processed.
//!
//! Owned and mutated by the processing pipeline; the preview consults it as
//! a pure membership predicate. It is injected into every evaluation rather
//! than reached ambiently, so tests can substitute a fixed set.

use crate::domain::UnitId;
use std::collections::HashSet;

/// Process-wide set of unit ids with an in-flight processing job.
#[derive(Debug, Clone, Default)]
pub struct PendingUnits {
    units: HashSet<UnitId>,
}

impl PendingUnits {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `unit` has an in-flight processing job.
    #[must_use]
    pub fn contains(&self, unit: &UnitId) -> bool {
        self.units.contains(unit)
    }

    /// Marks `unit` as pending. Writer side, used by the pipeline only.
    pub fn mark(&mut self, unit: UnitId) {
        self.units.insert(unit);
    }

    /// Clears the pending mark for `unit`.
    pub fn clear(&mut self, unit: &UnitId) {
        self.units.remove(unit);
    }

    /// Number of pending units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no unit is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_clear_round_trip() {
        let mut pending = PendingUnits::new();
        let unit = UnitId::new("u1");
        assert!(!pending.contains(&unit));

        pending.mark(unit.clone());
        assert!(pending.contains(&unit));
        assert_eq!(pending.len(), 1);

        pending.clear(&unit);
        assert!(!pending.contains(&unit));
        assert!(pending.is_empty());
    }

    #[test]
    fn marking_twice_is_idempotent() {
        let mut pending = PendingUnits::new();
        pending.mark(UnitId::new("u1"));
        pending.mark(UnitId::new("u1"));
        assert_eq!(pending.len(), 1);
    }
}
