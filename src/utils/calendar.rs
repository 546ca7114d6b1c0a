//! ICS calendar invite generation
//!
//! Renders .ics file content for proposed demo slots and parses the
//! natural-language meeting times the analyzer reports ("Tuesday at 2pm",
//! "tomorrow 10:30am"). Parsing is deliberately best-effort; anything it
//! cannot place lands on the next business day at a default hour.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

const ORGANIZER_NAME: &str = "Lead Relay Sales";
const ORGANIZER_EMAIL: &str = "sales@lead-relay.dev";
const MEETING_MINUTES: i64 = 30;
const DEFAULT_HOUR: u32 = 14;

/// A calendar event to render as ICS
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub organizer_name: String,
    pub organizer_email: String,
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
}

/// One proposed meeting slot, ready to attach to the follow-up email
pub struct MeetingOption {
    /// The original natural-language phrase
    pub label: String,
    pub start: DateTime<Utc>,
    pub ics: String,
}

/// Render ICS file content for a calendar event
pub fn generate_ics(event: &CalendarEvent) -> String {
    let uid = format!(
        "{}-{}@lead-relay",
        Utc::now().timestamp_millis(),
        event.start.timestamp()
    );

    let mut ics = format!(
        "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//Lead Relay//EN\nCALSCALE:GREGORIAN\nMETHOD:REQUEST\nBEGIN:VEVENT\nUID:{uid}\nDTSTAMP:{stamp}\nDTSTART:{start}\nDTEND:{end}\nSUMMARY:{summary}\nDESCRIPTION:{description}\nORGANIZER;CN={organizer_name}:mailto:{organizer_email}",
        uid = uid,
        stamp = format_ics_date(Utc::now()),
        start = format_ics_date(event.start),
        end = format_ics_date(event.end),
        summary = escape_text(&event.title),
        description = escape_text(&event.description),
        organizer_name = escape_text(&event.organizer_name),
        organizer_email = event.organizer_email,
    );

    if let Some(attendee_email) = &event.attendee_email {
        let display = event
            .attendee_name
            .as_deref()
            .unwrap_or(attendee_email.as_str());
        ics.push_str(&format!(
            "\nATTENDEE;CN={};RSVP=TRUE:mailto:{}",
            escape_text(display),
            attendee_email
        ));
    }

    if let Some(location) = &event.location {
        ics.push_str(&format!("\nLOCATION:{}", escape_text(location)));
    }

    ics.push_str("\nSTATUS:CONFIRMED\nSEQUENCE:0\nEND:VEVENT\nEND:VCALENDAR");
    ics
}

fn format_ics_date(date: DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape text per the ICS property rules
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Parse a meeting time phrase relative to `base`.
///
/// Understands weekday names ("Tuesday at 2pm"), "tomorrow", and bare times;
/// everything else resolves to the next business day at the extracted (or
/// default) hour.
pub fn parse_meeting_time(phrase: &str, base: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = phrase.to_lowercase();
    let (hour, minute) = extract_time(&lower);

    const DAYS: [(&str, Weekday); 7] = [
        ("sunday", Weekday::Sun),
        ("monday", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("saturday", Weekday::Sat),
    ];

    for (name, weekday) in DAYS {
        if lower.contains(name) {
            let current = base.weekday().num_days_from_sunday() as i64;
            let target = weekday.num_days_from_sunday() as i64;
            let mut days_until = target - current;
            if days_until <= 0 {
                days_until += 7;
            }
            let date = base.date_naive() + Duration::days(days_until);
            return Some(date.and_hms_opt(hour, minute, 0)?.and_utc());
        }
    }

    if lower.contains("tomorrow") {
        let date = base.date_naive() + Duration::days(1);
        return Some(date.and_hms_opt(hour, minute, 0)?.and_utc());
    }

    // Default: next business day at the extracted time
    let mut date = base.date_naive() + Duration::days(1);
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date += Duration::days(1);
    }
    Some(date.and_hms_opt(hour, minute, 0)?.and_utc())
}

/// Extract an hour/minute pair from a lowercased phrase.
///
/// Takes the first digit run as the hour, an optional ":mm", and an am/pm
/// marker immediately after. Falls back to mid-afternoon.
fn extract_time(lower: &str) -> (u32, u32) {
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let mut hour: u32 = lower[start..i].parse().unwrap_or(DEFAULT_HOUR);
            let mut minute: u32 = 0;

            if i < bytes.len() && bytes[i] == b':' {
                let m_start = i + 1;
                let mut j = m_start;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                if j > m_start {
                    minute = lower[m_start..j].parse().unwrap_or(0);
                    i = j;
                }
            }

            let rest = lower[i..].trim_start();
            if rest.starts_with("pm") && hour < 12 {
                hour += 12;
            } else if rest.starts_with("am") && hour == 12 {
                hour = 0;
            }

            if hour > 23 {
                hour = DEFAULT_HOUR;
            }
            return (hour, minute.min(59));
        }
        i += 1;
    }
    (DEFAULT_HOUR, 0)
}

/// Build ICS options for every parseable proposed meeting time
pub fn meeting_options(
    proposed_times: &[String],
    attendee_email: &str,
    attendee_name: &str,
    company_name: &str,
    base: DateTime<Utc>,
) -> Vec<MeetingOption> {
    let mut options = Vec::new();

    for phrase in proposed_times {
        let Some(start) = parse_meeting_time(phrase, base) else {
            continue;
        };
        let end = start + Duration::minutes(MEETING_MINUTES);

        let ics = generate_ics(&CalendarEvent {
            title: format!("Product Demo - {}", company_name),
            description: "Discovery call to walk through your specific needs and see the platform in action.\n\nA video link will be provided before the call.".to_string(),
            location: Some("Video Call (link will be provided)".to_string()),
            start,
            end,
            organizer_name: ORGANIZER_NAME.to_string(),
            organizer_email: ORGANIZER_EMAIL.to_string(),
            attendee_name: Some(attendee_name.to_string()),
            attendee_email: Some(attendee_email.to_string()),
        });

        options.push(MeetingOption {
            label: phrase.clone(),
            start,
            ics,
        });
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn monday_noon() -> DateTime<Utc> {
        // 2026-08-03 is a Monday
        Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_weekday_phrase_lands_on_next_matching_day() {
        let parsed = parse_meeting_time("Tuesday at 2pm", monday_noon()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 4, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_same_weekday_rolls_to_next_week() {
        let parsed = parse_meeting_time("Monday at 9am", monday_noon()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_tomorrow_with_minutes() {
        let parsed = parse_meeting_time("tomorrow 10:30am", monday_noon()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 4, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_vague_phrase_defaults_to_next_business_day() {
        // Friday base: next business day is Monday
        let friday = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let parsed = parse_meeting_time("sometime next week", friday).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 10, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_noon_edge_cases() {
        let parsed = parse_meeting_time("tomorrow at 12pm", monday_noon()).unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "12:00");

        let parsed = parse_meeting_time("tomorrow at 12am", monday_noon()).unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn test_ics_content_and_escaping() {
        let start = monday_noon();
        let event = CalendarEvent {
            title: "Demo, with commas; and semicolons".to_string(),
            description: "Line one\nLine two".to_string(),
            location: None,
            start,
            end: start + Duration::minutes(30),
            organizer_name: "Sales".to_string(),
            organizer_email: "sales@example.com".to_string(),
            attendee_name: Some("Dana".to_string()),
            attendee_email: Some("dana@example.com".to_string()),
        };

        let ics = generate_ics(&event);
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.ends_with("END:VCALENDAR"));
        assert!(ics.contains("DTSTART:20260803T120000Z"));
        assert!(ics.contains("SUMMARY:Demo\\, with commas\\; and semicolons"));
        assert!(ics.contains("DESCRIPTION:Line one\\nLine two"));
        assert!(ics.contains("ATTENDEE;CN=Dana;RSVP=TRUE:mailto:dana@example.com"));
    }

    #[test]
    fn test_meeting_options_one_per_phrase() {
        let times = vec!["Tuesday at 2pm".to_string(), "Friday at 10am".to_string()];
        let options = meeting_options(&times, "dana@example.com", "Dana", "Acme HVAC", monday_noon());
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "Tuesday at 2pm");
        assert!(options[0].ics.contains("Acme HVAC"));
    }
}
