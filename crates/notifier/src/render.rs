//! Message rendering — appointment events → Telegram-HTML text.
//!
//! Pure translation with no side effects. Every text field is untrusted and
//! passes through entity escaping before it reaches the markup-enabled
//! transport; numeric fields are interpolated as-is.

use chrono_tz::Tz;

use visawatch_common::types::AppointmentEvent;

/// Placeholder shown when the source publishes no availability date.
pub const NO_INFORMATION_PLACEHOLDER: &str = "No information";

/// Format for the "Last checked" line, rendered in the configured zone.
const LAST_CHECKED_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Escape the five markup-significant characters for Telegram HTML mode.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render an appointment event into the fixed notification template.
///
/// Country and mission codes are upper-cased before escaping. A missing
/// availability date becomes [`NO_INFORMATION_PLACEHOLDER`]; a present one
/// is escaped and passed through verbatim. The "Last checked" timestamp is
/// converted to `tz` before formatting.
pub fn render(event: &AppointmentEvent, tz: Tz) -> String {
    let last_available = match &event.last_available_date {
        Some(date) => escape_html(date),
        None => NO_INFORMATION_PLACEHOLDER.to_string(),
    };

    let last_checked = event
        .last_checked_at
        .with_timezone(&tz)
        .format(LAST_CHECKED_FORMAT)
        .to_string();

    format!(
        "<b>📋 Appointment Status Update</b>\n\
         \n\
         <b>Status:</b> {status}\n\
         <b>Location:</b> {center}\n\
         <b>Country/Mission:</b> {country} -> {mission}\n\
         <b>Category:</b> {category}\n\
         <b>Type:</b> {visa_type}\n\
         <b>Last available date:</b> {last_available}\n\
         <b>Tracking count:</b> {tracking_count}\n\
         <b>Last checked:</b> {last_checked}",
        status = escape_html(&event.status),
        center = escape_html(&event.center),
        country = escape_html(&event.country_code.to_uppercase()),
        mission = escape_html(&event.mission_code.to_uppercase()),
        category = escape_html(&event.visa_category),
        visa_type = escape_html(&event.visa_type),
        tracking_count = event.tracking_count,
        last_checked = escape_html(&last_checked),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_event() -> AppointmentEvent {
        AppointmentEvent {
            status: "active".to_string(),
            center: "Berlin".to_string(),
            country_code: "tr".to_string(),
            mission_code: "de".to_string(),
            visa_category: "tourism".to_string(),
            visa_type: "short-stay".to_string(),
            last_available_date: None,
            tracking_count: 4,
            last_checked_at: Utc.with_ymd_and_hms(2026, 8, 5, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_escape_html_replaces_all_five_characters() {
        assert_eq!(
            escape_html(r#"<b>&"it's"</b>"#),
            "&lt;b&gt;&amp;&quot;it&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_html_ampersand_not_double_escaped() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_render_escapes_input_fields() {
        let mut event = make_event();
        event.status = "<script>alert('x')</script>".to_string();
        event.center = "Foo & Bar \"Center\"".to_string();

        let text = render(&event, chrono_tz::Europe::Istanbul);

        assert!(!text.contains("<script>"));
        assert!(text.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(text.contains("Foo &amp; Bar &quot;Center&quot;"));
    }

    #[test]
    fn test_render_uppercases_country_and_mission() {
        let event = make_event();
        let text = render(&event, chrono_tz::Europe::Istanbul);
        assert!(text.contains("<b>Country/Mission:</b> TR -> DE"));
    }

    #[test]
    fn test_render_missing_date_uses_placeholder() {
        let event = make_event();
        let text = render(&event, chrono_tz::Europe::Istanbul);
        assert!(text.contains(&format!(
            "<b>Last available date:</b> {}",
            NO_INFORMATION_PLACEHOLDER
        )));
        assert!(!text.contains("<b>Last available date:</b> \n"));
    }

    #[test]
    fn test_render_present_date_passed_verbatim() {
        let mut event = make_event();
        event.last_available_date = Some("2026-09-01".to_string());
        let text = render(&event, chrono_tz::Europe::Istanbul);
        assert!(text.contains("<b>Last available date:</b> 2026-09-01"));
    }

    #[test]
    fn test_render_timestamp_in_configured_zone() {
        let event = make_event();
        // 09:30 UTC is 12:30 in Istanbul (UTC+3).
        let text = render(&event, chrono_tz::Europe::Istanbul);
        assert!(text.contains("<b>Last checked:</b> 05.08.2026 12:30:00"));
    }

    #[test]
    fn test_render_field_order_is_fixed() {
        let event = make_event();
        let text = render(&event, chrono_tz::Europe::Istanbul);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "<b>📋 Appointment Status Update</b>");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("<b>Status:</b>"));
        assert!(lines[3].starts_with("<b>Location:</b>"));
        assert!(lines[4].starts_with("<b>Country/Mission:</b>"));
        assert!(lines[5].starts_with("<b>Category:</b>"));
        assert!(lines[6].starts_with("<b>Type:</b>"));
        assert!(lines[7].starts_with("<b>Last available date:</b>"));
        assert!(lines[8].starts_with("<b>Tracking count:</b> 4"));
        assert!(lines[9].starts_with("<b>Last checked:</b>"));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_render_is_deterministic() {
        let event = make_event();
        let a = render(&event, chrono_tz::Europe::Istanbul);
        let b = render(&event, chrono_tz::Europe::Istanbul);
        assert_eq!(a, b);
    }
}
