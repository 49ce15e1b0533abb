//! Shift catalog.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftDefinition;

use super::{read, write};

/// Counts reported by [`ShiftCatalog::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    /// Codes that did not exist before.
    pub created: usize,
    /// Codes whose definition was replaced.
    pub updated: usize,
}

/// Shift definitions keyed by code.
///
/// Definitions are never removed, only deactivated, so references held by
/// assignments, overrides and weekly entries always resolve.
#[derive(Debug, Default)]
pub struct ShiftCatalog {
    shifts: RwLock<BTreeMap<String, ShiftDefinition>>,
}

impl ShiftCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a definition after normalizing it.
    pub fn upsert(&self, shift: ShiftDefinition) -> EngineResult<ShiftDefinition> {
        let shift = shift.normalized()?;
        write(&self.shifts).insert(shift.code.clone(), shift.clone());
        Ok(shift)
    }

    /// Upserts a batch of definitions by code.
    pub fn seed(&self, shifts: Vec<ShiftDefinition>) -> EngineResult<SeedOutcome> {
        let mut outcome = SeedOutcome::default();
        for shift in shifts {
            let existed = self.get(&shift.code).is_some();
            self.upsert(shift)?;
            if existed {
                outcome.updated += 1;
            } else {
                outcome.created += 1;
            }
        }
        info!(
            created = outcome.created,
            updated = outcome.updated,
            "Shift catalog seeded"
        );
        Ok(outcome)
    }

    /// Looks up a definition, active or not.
    pub fn get(&self, code: &str) -> Option<ShiftDefinition> {
        read(&self.shifts).get(code).cloned()
    }

    /// Looks up a definition that may be newly referenced.
    pub fn require_active(&self, code: &str) -> EngineResult<ShiftDefinition> {
        let shift = self.get(code).ok_or_else(|| EngineError::ShiftNotFound {
            code: code.to_string(),
        })?;
        if !shift.active {
            return Err(EngineError::InactiveShift {
                code: code.to_string(),
            });
        }
        Ok(shift)
    }

    /// Marks a definition inactive.
    pub fn deactivate(&self, code: &str) -> EngineResult<()> {
        let mut shifts = write(&self.shifts);
        let shift = shifts
            .get_mut(code)
            .ok_or_else(|| EngineError::ShiftNotFound {
                code: code.to_string(),
            })?;
        shift.active = false;
        Ok(())
    }

    /// All definitions ordered by code.
    pub fn list(&self, active_only: bool) -> Vec<ShiftDefinition> {
        read(&self.shifts)
            .values()
            .filter(|s| !active_only || s.active)
            .cloned()
            .collect()
    }
}
