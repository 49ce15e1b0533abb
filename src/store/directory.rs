//! Employee directory.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId};

use super::{read, write};

/// Employees known to the engine, keyed by id.
#[derive(Debug, Default)]
pub struct EmployeeDirectory {
    employees: RwLock<BTreeMap<EmployeeId, Employee>>,
}

impl EmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee.
    pub fn upsert(&self, employee: Employee) {
        write(&self.employees).insert(employee.id, employee);
    }

    /// Looks up an employee.
    pub fn get(&self, id: EmployeeId) -> Option<Employee> {
        read(&self.employees).get(&id).cloned()
    }

    /// Looks up an active employee.
    pub fn require_active(&self, id: EmployeeId) -> EngineResult<Employee> {
        self.get(id)
            .filter(|e| e.active)
            .ok_or(EngineError::EmployeeNotFound { id })
    }

    /// Active employees, optionally restricted to a department, ordered by id.
    pub fn active(&self, department: Option<&str>) -> Vec<Employee> {
        read(&self.employees)
            .values()
            .filter(|e| e.active)
            .filter(|e| department.is_none_or(|d| e.in_department(d)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> EmployeeDirectory {
        let directory = EmployeeDirectory::new();
        directory.upsert(Employee::new(EmployeeId(1), "E1", "Ana", "Plant"));
        directory.upsert(Employee::new(EmployeeId(2), "E2", "Luis", "Office"));
        let mut gone = Employee::new(EmployeeId(3), "E3", "Marta", "Plant");
        gone.active = false;
        directory.upsert(gone);
        directory
    }

    #[test]
    fn test_active_filters_inactive_and_department() {
        let directory = directory();
        assert_eq!(directory.active(None).len(), 2);

        let plant = directory.active(Some("plant"));
        assert_eq!(plant.len(), 1);
        assert_eq!(plant[0].id, EmployeeId(1));
    }

    #[test]
    fn test_require_active() {
        let directory = directory();
        assert!(directory.require_active(EmployeeId(1)).is_ok());
        assert_eq!(
            directory.require_active(EmployeeId(3)),
            Err(EngineError::EmployeeNotFound { id: EmployeeId(3) })
        );
        assert!(directory.require_active(EmployeeId(99)).is_err());
    }
}
