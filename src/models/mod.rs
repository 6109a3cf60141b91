pub mod lead;

pub use lead::{parse_booking_time, Lead, LeadStatus, SlotList};
