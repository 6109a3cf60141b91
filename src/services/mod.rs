pub mod booking;
pub mod calls;
pub mod greeting;
pub mod leads;
pub mod speech;
pub mod telephony;
pub mod twiml;
