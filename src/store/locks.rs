//! Per-employee mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::EmployeeId;

use super::acquire;

/// Hands out one mutex per employee so units of work for different
/// employees run in parallel while those for the same employee serialize.
#[derive(Debug, Default)]
pub struct EmployeeLocks {
    locks: Mutex<HashMap<EmployeeId, Arc<Mutex<()>>>>,
}

impl EmployeeLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `employee`, created on first use.
    ///
    /// Callers hold the returned `Arc` and lock it for the duration of
    /// their unit of work.
    pub fn handle(&self, employee: EmployeeId) -> Arc<Mutex<()>> {
        let mut locks = acquire(&self.locks);
        Arc::clone(locks.entry(employee).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_employee_shares_mutex() {
        let locks = EmployeeLocks::new();
        let a = locks.handle(EmployeeId(1));
        let b = locks.handle(EmployeeId(1));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_employees_do_not_share() {
        let locks = EmployeeLocks::new();
        let a = locks.handle(EmployeeId(1));
        let b = locks.handle(EmployeeId(2));
        assert!(!Arc::ptr_eq(&a, &b));

        // Holding one does not block the other.
        let _guard = a.lock().unwrap();
        assert!(b.try_lock().is_ok());
    }
}
