use anyhow::{Context, anyhow};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a due-date or reminder argument.
/// Values without an offset are read as UTC, the same as timestamps coming
/// from the backend.
pub fn parse_date_arg(input: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let token = input.trim();
    let lower = token.to_ascii_lowercase();

    match lower.as_str() {
        "now" => return Ok(now),
        "today" => return Ok(midnight(now)),
        "tomorrow" => return Ok(midnight(now) + Duration::days(1)),
        _ => {}
    }

    if let Some(days) = lower
        .strip_prefix('+')
        .and_then(|rest| rest.strip_suffix('d'))
    {
        let days: i64 = days
            .parse()
            .with_context(|| format!("invalid relative date: {token}"))?;
        return Duration::try_days(days)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or_else(|| anyhow!("relative date out of range: {token}"));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(token) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(token, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            anyhow!(
                "unrecognized date: {token} \
                 (expected YYYY-MM-DD, YYYY-MM-DDTHH:MM, today, tomorrow or +Nd)"
            )
        })
}

fn midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}
