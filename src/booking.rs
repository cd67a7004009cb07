//! Meeting-booking lead form.
//!
//! The site's only write path besides admin editing: a visitor asks for an
//! intro call. Validation here is deliberately shallow (the service owns the
//! real rules); it exists so obviously broken submissions fail locally with
//! a clear message instead of burning a round-trip.

use crate::locale::BlogLocale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Requested meeting slot; the team confirms or reschedules by email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_slot: Option<DateTime<Utc>>,
    /// Locale the form was submitted from, so the reply matches it.
    pub locale: BlogLocale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub id: i64,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("a valid email is required".to_string());
        }
        Ok(())
    }
}
