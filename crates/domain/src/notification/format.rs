use chrono::{DateTime, Utc};

// Stored timestamps are rendered as they are, no timezone correction is applied
fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts).unwrap_or_default()
}

/// Short date, e.g. `Oct 17, 2026`
pub fn format_date(ts: i64) -> String {
    to_datetime(ts).format("%b %-d, %Y").to_string()
}

/// Short time, e.g. `9:05 AM`
pub fn format_time(ts: i64) -> String {
    to_datetime(ts).format("%-I:%M %p").to_string()
}

/// Escapes text supplied by users before it is placed into an html body
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sat Oct 17 2026 09:05:00 UTC
    const TS: i64 = 1792227900000;

    #[test]
    fn it_formats_dates_and_times() {
        assert_eq!(format_date(TS), "Oct 17, 2026");
        assert_eq!(format_time(TS), "9:05 AM");
        assert_eq!(format_time(TS + 1000 * 60 * 60 * 12), "9:05 PM");
    }

    #[test]
    fn it_escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'co'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;co&#39;"
        );
        assert_eq!(escape_html("Buffer pH 7.4"), "Buffer pH 7.4");
    }
}
