use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::db::{LeadStore, StoreError};
use crate::models::Lead;
use crate::services::booking::{self, SlotChoice};

/// Process-lifetime copy of the lead sheet plus the store it came from.
///
/// Every mutation happens under one lock and is followed by a full save, so
/// concurrent keypad callbacks are applied one after another.
pub struct LeadBook {
    leads: Mutex<Vec<Lead>>,
    store: Box<dyn LeadStore>,
}

impl LeadBook {
    pub fn load(store: Box<dyn LeadStore>) -> Result<Self, StoreError> {
        let leads = store.load()?;

        let mut seen = std::collections::HashSet::new();
        for lead in &leads {
            if !seen.insert(lead.id) {
                tracing::warn!(lead_id = lead.id, "duplicate lead id, only the first row is reachable");
            }
        }
        tracing::info!(count = leads.len(), "loaded leads");

        Ok(Self {
            leads: Mutex::new(leads),
            store,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Lead>> {
        self.leads.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn find(&self, lead_id: i64) -> Option<Lead> {
        self.lock().iter().find(|l| l.id == lead_id).cloned()
    }

    pub fn all(&self) -> Vec<Lead> {
        self.lock().clone()
    }

    /// Apply a keypad response to the lead and persist the whole sheet.
    /// Returns `None` when the lead does not exist.
    pub fn record_choice(
        &self,
        lead_id: i64,
        digits: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SlotChoice>, StoreError> {
        let mut leads = self.lock();

        let Some(lead) = leads.iter_mut().find(|l| l.id == lead_id) else {
            return Ok(None);
        };
        let choice = booking::apply_choice(lead, digits, now);

        self.store.save(&leads)?;
        Ok(Some(choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryLeadStore;
    use crate::models::LeadStatus;
    use std::sync::Arc;

    fn book_with(leads: Vec<Lead>) -> (LeadBook, Arc<MemoryLeadStore>) {
        let store = Arc::new(MemoryLeadStore::new(leads));
        let book = LeadBook::load(Box::new(Arc::clone(&store))).unwrap();
        (book, store)
    }

    #[test]
    fn test_find_uses_first_match() {
        let (book, _) = book_with(vec![
            Lead::new(1, "+15550000001", "First", "Mon 3 PM"),
            Lead::new(1, "+15550000099", "Second", "Tue 4 PM"),
        ]);
        assert_eq!(book.find(1).unwrap().name, "First");
        assert!(book.find(2).is_none());
    }

    #[test]
    fn test_record_choice_persists() {
        let (book, store) = book_with(vec![
            Lead::new(7, "+15550000007", "Ada", "Mon 3 PM;Tue 4 PM"),
            Lead::new(8, "+15550000008", "Bob", "Wed 1 PM"),
        ]);

        let choice = book.record_choice(7, "2", Utc::now()).unwrap().unwrap();
        assert_eq!(choice.slot(), Some("Tue 4 PM"));

        let persisted = store.snapshot();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].booked_slot.as_deref(), Some("Tue 4 PM"));
        assert_eq!(persisted[0].status, LeadStatus::Booked);
        assert_eq!(persisted[1].status, LeadStatus::Pending);
        assert_eq!(book.find(7).unwrap(), persisted[0]);
    }

    #[test]
    fn test_record_choice_unknown_lead() {
        let (book, store) = book_with(vec![Lead::new(7, "+15550000007", "Ada", "Mon 3 PM")]);
        assert!(book.record_choice(42, "1", Utc::now()).unwrap().is_none());
        assert_eq!(store.snapshot()[0].status, LeadStatus::Pending);
    }

    #[test]
    fn test_concurrent_choices_are_not_lost() {
        let leads = (1..=16)
            .map(|id| Lead::new(id, "+15550000000", "Lead", "Mon 3 PM;Tue 4 PM"))
            .collect();
        let (book, store) = book_with(leads);
        let book = Arc::new(book);

        let handles: Vec<_> = (1..=16)
            .map(|id| {
                let book = Arc::clone(&book);
                std::thread::spawn(move || {
                    book.record_choice(id, "1", Utc::now()).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store
            .snapshot()
            .iter()
            .all(|l| l.status == LeadStatus::Booked));
    }
}
