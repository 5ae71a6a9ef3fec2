use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Calendar days between registration and the preliminary test.
const TEST_DATE_OFFSET_DAYS: u64 = 3;

/// The day a registrant signed up, resolved to a UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationDate {
    registered_on: NaiveDate,
    test_date: NaiveDate,
}

impl RegistrationDate {
    pub fn new(registered_on: NaiveDate) -> Result<RegistrationDate, String> {
        let test_date = registered_on
            .checked_add_days(Days::new(TEST_DATE_OFFSET_DAYS))
            .ok_or_else(|| format!("{} is out of the supported date range.", registered_on))?;
        Ok(Self {
            registered_on,
            test_date,
        })
    }

    /// Accepts a calendar date (`2024-01-30`, `January 30, 2024`), a timestamp
    /// with or without an offset, or a number of milliseconds since the Unix
    /// epoch.
    pub fn parse(value: &Value) -> Result<RegistrationDate, String> {
        let registered_on = match value {
            Value::String(s) => parse_date_string(s.trim())?,
            Value::Number(n) => {
                let millis = n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                    .ok_or_else(|| format!("{} is not a valid epoch timestamp.", n))?;
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .map(|t| t.date_naive())
                    .ok_or_else(|| format!("{} is out of the supported date range.", millis))?
            }
            other => return Err(format!("{} is not a date.", other)),
        };
        Self::new(registered_on)
    }

    pub fn registered_on(&self) -> NaiveDate {
        self.registered_on
    }

    pub fn test_date(&self) -> NaiveDate {
        self.test_date
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

fn parse_date_string(s: &str) -> Result<NaiveDate, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(timestamp) = DateTime::parse_from_str(s, format) {
            return Ok(timestamp.with_timezone(&Utc).date_naive());
        }
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(timestamp.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    Err(format!("{:?} is not a recognised date.", s))
}
