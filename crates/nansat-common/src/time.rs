//! Time string parsing for dataset metadata.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{NansatError, NansatResult};

/// Date-time formats carrying a UTC offset, tried after RFC 3339.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Date-time formats without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only formats; the time defaults to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A parsed timestamp.
///
/// `offset` is `None` when the text carried no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub datetime: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl ParsedTime {
    fn naive(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            offset: None,
        }
    }

    fn zoned(dt: DateTime<FixedOffset>) -> Self {
        Self {
            datetime: dt.naive_local(),
            offset: Some(*dt.offset()),
        }
    }

    /// The instant in UTC, treating naive times as UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self.offset {
            Some(offset) => offset
                .from_local_datetime(&self.datetime)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&self.datetime)),
            None => Utc.from_utc_datetime(&self.datetime),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }
}

/// Parse a time string, accounting for a common formatting mistake.
///
/// Some datasets store dates as `YYYY-MM-DDZ`, a zone marker with no time
/// component. Such strings are recovered by dropping the trailing `Z` and
/// parsing the date alone.
pub fn parse_time(time_string: &str) -> NansatResult<ParsedTime> {
    let s = time_string.trim();

    if let Some(parsed) = try_parse(s) {
        return Ok(parsed);
    }

    if let Some(parsed) = expand_iso(s).as_deref().and_then(try_parse) {
        return Ok(parsed);
    }

    if s.len() == 11 && s.ends_with('Z') {
        if let Some(date) = s.get(..10).and_then(parse_date) {
            tracing::debug!(input = %s, "Recovered date-only time string with stray 'Z'");
            return Ok(ParsedTime::naive(date.and_time(NaiveTime::MIN)));
        }
    }

    Err(NansatError::Format(format!(
        "cannot parse time string '{}'",
        time_string
    )))
}

fn try_parse(s: &str) -> Option<ParsedTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedTime::zoned(dt));
    }

    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(ParsedTime::zoned(dt));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ParsedTime::naive(ndt));
        }
    }

    parse_date(s).map(|date| ParsedTime::naive(date.and_time(NaiveTime::MIN)))
}

/// Rewrite compact ISO 8601 forms into the extended layouts above:
/// `20200101`, `20200101T1230`, `20200101T123045` and the hour-only
/// `2020-01-01T12`. A trailing `Z` is kept on the date-time forms.
fn expand_iso(s: &str) -> Option<String> {
    if !s.is_ascii() {
        return None;
    }
    let digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    let (body, zone) = match s.strip_suffix('Z') {
        Some(body) => (body, "Z"),
        None => (s, ""),
    };

    match body.len() {
        8 if digits(body) => Some(format!("{}-{}-{}", &body[..4], &body[4..6], &body[6..])),
        13 | 15 if digits(&body[..8]) && &body[8..9] == "T" && digits(&body[9..]) => {
            let time = &body[9..];
            let seconds = time.get(4..6).unwrap_or("00");
            Some(format!(
                "{}-{}-{}T{}:{}:{}{}",
                &body[..4],
                &body[4..6],
                &body[6..8],
                &time[..2],
                &time[2..4],
                seconds,
                zone
            ))
        }
        13 if matches!(body.as_bytes()[10], b'T' | b' ') && digits(&body[11..]) => {
            Some(format!("{}:00:00{}", body, zone))
        }
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
