//! Request field validation.
//!
//! A [`Validator`] collects every problem in a request body so the caller
//! gets one 400 listing all of them, and nothing is handed to the store
//! unless the whole body is valid.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use shared_models::error::AppError;

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Default)]
pub struct Validator {
    problems: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.problems.push(message.into());
        }
    }

    pub fn required<T>(&mut self, value: Option<T>, field: &str) -> Option<T> {
        if value.is_none() {
            self.problems.push(format!("{} is required", field));
        }
        value
    }

    /// Required and not blank. Stored exactly as submitted.
    pub fn text(&mut self, value: Option<String>, field: &str) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.problems.push(format!("{} is required", field));
                String::new()
            }
        }
    }

    /// Blank collapses to `None`; anything else is kept as submitted.
    pub fn optional_text(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    /// Required and must contain `@`.
    pub fn email(&mut self, value: Option<String>, field: &str) -> String {
        let email = self.text(value, field);
        if !email.is_empty() && !email.contains('@') {
            self.problems.push(format!("{} is not a valid email address", field));
        }
        email
    }

    /// `YYYY-MM-DD`.
    pub fn date(&mut self, value: Option<String>, field: &str) -> Option<NaiveDate> {
        let raw = self.required(value, field)?;
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.problems.push(format!("{} must be a date in YYYY-MM-DD format", field));
                None
            }
        }
    }

    /// RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
    pub fn timestamp(&mut self, value: Option<String>, field: &str) -> Option<DateTime<Utc>> {
        let raw = self.required(value, field)?;
        match parse_timestamp(&raw) {
            Some(ts) => Some(ts),
            None => {
                self.problems.push(format!("{} must be an ISO 8601 timestamp", field));
                None
            }
        }
    }

    /// At least 1 and fits in `u32`.
    pub fn positive(&mut self, value: Option<i64>, field: &str) -> u32 {
        match value {
            None => {
                self.problems.push(format!("{} is required", field));
                0
            }
            Some(n) => match u32::try_from(n) {
                Ok(n) if n >= 1 => n,
                _ => {
                    self.problems.push(format!("{} must be a positive integer", field));
                    0
                }
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// Fails with every collected problem, otherwise runs `build`.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, AppError> {
        if !self.problems.is_empty() {
            return Err(AppError::ValidationError(self.problems.join("; ")));
        }
        build().ok_or_else(|| AppError::ValidationError("Missing required fields".to_string()))
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
