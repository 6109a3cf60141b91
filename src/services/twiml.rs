//! Just enough TwiML for the booking call: a prompt that gathers one key
//! press and short spoken replies.

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Play the greeting inside a single-digit `<Gather>`. If the caller presses
/// nothing before `timeout_secs`, Twilio falls through to the `<Say>`.
pub fn gather_prompt(audio_url: &str, action: &str, timeout_secs: u32) -> String {
    format!(
        "{HEADER}<Response>\
         <Gather numDigits=\"1\" action=\"{action}\" timeout=\"{timeout_secs}\">\
         <Play>{audio}</Play>\
         </Gather>\
         <Say>No input received. Goodbye.</Say>\
         </Response>",
        action = escape(action),
        audio = escape(audio_url),
    )
}

pub fn say(text: &str) -> String {
    format!("{HEADER}<Response><Say>{}</Say></Response>", escape(text))
}
