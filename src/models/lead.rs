use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the leads file. Column names follow the spreadsheet the
/// sales team exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "LeadID")]
    pub id: i64,
    #[serde(rename = "PhoneNumber")]
    pub phone: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "AvailableSlots", default)]
    pub slots: SlotList,
    #[serde(rename = "BookedSlot", default)]
    pub booked_slot: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: LeadStatus,
    #[serde(
        rename = "BookingTime",
        default,
        deserialize_with = "deserialize_booking_time"
    )]
    pub booking_time: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn new(id: i64, phone: &str, name: &str, slots: &str) -> Self {
        Self {
            id,
            phone: phone.to_string(),
            name: name.to_string(),
            slots: SlotList::parse(slots),
            booked_slot: None,
            status: LeadStatus::Pending,
            booking_time: None,
        }
    }
}

/// Parse a stored booking time. RFC 3339 is what we write; older sheets hold
/// offset-less ISO 8601 (`2025-06-16T14:30:00.123456`), which is UTC.
pub fn parse_booking_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_booking_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_booking_time(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid BookingTime: {s}"))),
    }
}

/// Ordered slot labels. Stored as a single `;`-separated field; a caller's
/// keypad choice N refers to the N-th entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SlotList(Vec<String>);

impl SlotList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Slot for a 1-based keypad choice.
    pub fn choice(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|idx| self.0.get(idx))
            .map(String::as_str)
    }
}

impl From<String> for SlotList {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<SlotList> for String {
    fn from(slots: SlotList) -> Self {
        slots.0.join(";")
    }
}

impl fmt::Display for SlotList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(";"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    #[default]
    Pending,
    Booked,
    NoAnswer,
    /// Anything else an operator typed into the sheet.
    Other(String),
}

impl LeadStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::Pending => "",
            LeadStatus::Booked => "Booked",
            LeadStatus::NoAnswer => "No-Answer",
            LeadStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" => LeadStatus::Pending,
            "Booked" => LeadStatus::Booked,
            // U+2011 non-breaking hyphen shows up in older sheets
            "No-Answer" | "No\u{2011}Answer" => LeadStatus::NoAnswer,
            other => LeadStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for LeadStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<LeadStatus> for String {
    fn from(status: LeadStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_list_trims_and_drops_empty_entries() {
        let slots = SlotList::parse(" Mon 3 PM ; ;Tue 4 PM;");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.iter().collect::<Vec<_>>(), vec!["Mon 3 PM", "Tue 4 PM"]);
        assert_eq!(slots.to_string(), "Mon 3 PM;Tue 4 PM");
    }

    #[test]
    fn test_slot_choice_is_one_based() {
        let slots = SlotList::parse("Mon 3 PM;Tue 4 PM");
        assert_eq!(slots.choice(0), None);
        assert_eq!(slots.choice(1), Some("Mon 3 PM"));
        assert_eq!(slots.choice(2), Some("Tue 4 PM"));
        assert_eq!(slots.choice(3), None);
    }

    #[test]
    fn test_empty_slot_field() {
        assert!(SlotList::parse("").is_empty());
        assert!(SlotList::parse(" ; ").is_empty());
    }

    #[test]
    fn test_parse_booking_time_formats() {
        use chrono::TimeZone;

        let expected = Utc.with_ymd_and_hms(2025, 6, 16, 14, 30, 0).unwrap();
        assert_eq!(parse_booking_time("2025-06-16T14:30:00Z"), Some(expected));
        assert_eq!(parse_booking_time("2025-06-16T16:30:00+02:00"), Some(expected));
        assert_eq!(parse_booking_time("2025-06-16T14:30:00"), Some(expected));
        assert_eq!(parse_booking_time("2025-06-16 14:30:00"), Some(expected));
        assert_eq!(
            parse_booking_time("2025-06-16T14:30:00.123456"),
            Some(expected + chrono::Duration::microseconds(123_456))
        );
        assert_eq!(parse_booking_time("yesterday"), None);
        assert_eq!(parse_booking_time(""), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(LeadStatus::parse(""), LeadStatus::Pending);
        assert_eq!(LeadStatus::parse("Booked"), LeadStatus::Booked);
        assert_eq!(LeadStatus::parse("No-Answer"), LeadStatus::NoAnswer);
        assert_eq!(LeadStatus::parse("No\u{2011}Answer"), LeadStatus::NoAnswer);
        assert_eq!(
            LeadStatus::parse("Call back"),
            LeadStatus::Other("Call back".to_string())
        );
        assert_eq!(LeadStatus::NoAnswer.as_str(), "No-Answer");
    }
}
