use std::sync::Mutex;

use super::{LeadStore, StoreError};
use crate::models::Lead;

/// Keeps the "persisted" copy in process memory. Handy for tests and dry runs.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
}

impl MemoryLeadStore {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads: Mutex::new(leads),
        }
    }

    pub fn snapshot(&self) -> Vec<Lead> {
        self.leads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LeadStore for MemoryLeadStore {
    fn load(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.snapshot())
    }

    fn replace_all(&self, leads: &[Lead]) -> Result<(), StoreError> {
        let mut stored = self
            .leads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = leads.to_vec();
        Ok(())
    }
}
