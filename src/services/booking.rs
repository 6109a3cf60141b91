use chrono::{DateTime, Utc};

use crate::models::{Lead, LeadStatus};

/// Result of a keypad response against a lead's slot list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotChoice {
    Selected(String),
    NoSelection,
}

impl SlotChoice {
    pub fn slot(&self) -> Option<&str> {
        match self {
            SlotChoice::Selected(slot) => Some(slot),
            SlotChoice::NoSelection => None,
        }
    }
}

/// Map the `Digits` callback field to a slot. Anything that is not a plain
/// decimal number in `1..=slots` counts as no selection, including input
/// with surrounding whitespace.
pub fn select_slot(lead: &Lead, digits: &str) -> SlotChoice {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return SlotChoice::NoSelection;
    }

    digits
        .parse::<usize>()
        .ok()
        .and_then(|n| lead.slots.choice(n))
        .map(|slot| SlotChoice::Selected(slot.to_string()))
        .unwrap_or(SlotChoice::NoSelection)
}

/// Write the outcome onto the lead. The booking time is stamped either way.
pub fn apply_choice(lead: &mut Lead, digits: &str, now: DateTime<Utc>) -> SlotChoice {
    let choice = select_slot(lead, digits);

    match &choice {
        SlotChoice::Selected(slot) => {
            lead.booked_slot = Some(slot.clone());
            lead.status = LeadStatus::Booked;
        }
        SlotChoice::NoSelection => {
            lead.booked_slot = None;
            lead.status = LeadStatus::NoAnswer;
        }
    }
    lead.booking_time = Some(now);

    tracing::info!(
        lead_id = lead.id,
        digits = %digits,
        status = lead.status.as_str(),
        slot = ?choice.slot(),
        "recorded slot choice"
    );

    choice
}

pub fn confirmation_message(choice: &SlotChoice) -> String {
    match choice {
        SlotChoice::Selected(slot) => format!("Your appointment is set for {slot}. Thank you!"),
        SlotChoice::NoSelection => "Invalid choice, exiting.".to_string(),
    }
}
