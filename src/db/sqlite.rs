use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::{migrations, LeadStore, StoreError};
use crate::models::{parse_booking_time, Lead, LeadStatus, SlotList};

/// A stored row exactly as read, before validation.
#[derive(Debug, Clone)]
struct LeadRow {
    lead_id: i64,
    phone: String,
    name: String,
    slots: String,
    booked_slot: Option<String>,
    status: String,
    booking_time: Option<String>,
}

impl LeadRow {
    fn from_lead(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id,
            phone: lead.phone.clone(),
            name: lead.name.clone(),
            slots: lead.slots.to_string(),
            booked_slot: lead.booked_slot.clone(),
            status: lead.status.as_str().to_string(),
            booking_time: lead.booking_time.map(|t| t.to_rfc3339()),
        }
    }

    fn to_lead(&self) -> Result<Lead, String> {
        let booking_time = match self.booking_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                parse_booking_time(raw).ok_or_else(|| format!("invalid booking_time: {raw}"))?,
            ),
        };

        Ok(Lead {
            id: self.lead_id,
            phone: self.phone.clone(),
            name: self.name.clone(),
            slots: SlotList::parse(&self.slots),
            booked_slot: self.booked_slot.clone().filter(|s| !s.is_empty()),
            status: LeadStatus::parse(&self.status),
            booking_time,
        })
    }
}

pub struct SqliteLeadStore {
    conn: Mutex<Connection>,
    /// Rows from the last load that failed validation; re-inserted verbatim
    /// after the valid rows on every save.
    quarantined: Mutex<Vec<LeadRow>>,
}

impl SqliteLeadStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        migrations::run_migrations(&conn).map_err(|e| StoreError::Migration(format!("{e:#}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
            quarantined: Mutex::new(Vec::new()),
        })
    }

    pub fn quarantined_count(&self) -> usize {
        self.quarantined
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .len()
    }
}

impl LeadStore for SqliteLeadStore {
    fn load(&self) -> Result<Vec<Lead>, StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        let mut stmt = conn.prepare(
            "SELECT lead_id, phone, name, slots, booked_slot, status, booking_time
             FROM leads ORDER BY position",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(LeadRow {
                lead_id: row.get(0)?,
                phone: row.get(1)?,
                name: row.get(2)?,
                slots: row.get(3)?,
                booked_slot: row.get(4)?,
                status: row.get(5)?,
                booking_time: row.get(6)?,
            })
        })?;

        let mut quarantined = self.quarantined.lock().unwrap_or_else(|p| p.into_inner());
        quarantined.clear();

        let mut leads = Vec::new();
        for row in rows {
            let row = row?;
            match row.to_lead() {
                Ok(lead) => leads.push(lead),
                Err(e) => {
                    tracing::warn!(lead_id = row.lead_id, error = %e, "quarantining malformed lead row");
                    quarantined.push(row);
                }
            }
        }
        Ok(leads)
    }

    fn replace_all(&self, leads: &[Lead]) -> Result<(), StoreError> {
        let quarantined = self.quarantined.lock().unwrap_or_else(|p| p.into_inner());
        let mut conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM leads", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO leads (position, lead_id, phone, name, slots, booked_slot, status, booking_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            let rows = leads.iter().map(LeadRow::from_lead).chain(quarantined.iter().cloned());
            for (position, row) in rows.enumerate() {
                stmt.execute(params![
                    position as i64,
                    row.lead_id,
                    row.phone,
                    row.name,
                    row.slots,
                    row.booked_slot,
                    row.status,
                    row.booking_time,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
