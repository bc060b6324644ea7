//! Document Types
//!
//! A document is a user-owned note: a title, rich-text content (markup as
//! produced by the web editor), a visibility flag, and the server-assigned
//! id and creation timestamp. The backend owns every document; the client
//! only ever holds short-lived copies.
//!
//! Deserialization is deliberately lenient. Older rows come back with a
//! `null` title or content, no `visibility` column, or a naive timestamp
//! without an offset, and none of that may fail a whole list fetch.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fallback shown wherever a document has no usable title
pub const UNTITLED: &str = "Untitled";

/// Who can see a document. Interpretation is up to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    pub const ALL: [Visibility; 2] = [Visibility::Private, Visibility::Public];

    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Private => "Private",
            Visibility::Public => "Public",
        }
    }

    /// Parse the wire value, treating anything unrecognised as private
    pub fn from_wire(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("public") {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A document as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_visibility")]
    pub visibility: Visibility,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Title to display, falling back to "Untitled" when blank
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Creation time in the local timezone, formatted for people
    pub fn created_at_display(&self) -> String {
        match self.created_at {
            Some(created) => timestamp::format_local(created),
            None => "Unknown date".to_string(),
        }
    }
}

/// Body of a create (`POST /documents`) or update (`PUT /documents/{id}`) call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub title: String,
    pub content: String,
    pub visibility: Visibility,
}

impl DocumentPayload {
    pub fn new(title: impl Into<String>, content: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            visibility,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_visibility<'de, D>(deserializer: D) -> Result<Visibility, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|v| Visibility::from_wire(&v))
        .unwrap_or_default())
}

/// Timestamp parsing and display.
///
/// The backend emits RFC 3339 when the column is timezone-aware and a bare
/// ISO datetime otherwise; the latter is taken as UTC.
pub mod timestamp {
    use super::*;

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = raw.parse::<NaiveDateTime>() {
            return Some(naive.and_utc());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn format_local(at: DateTime<Utc>) -> String {
        at.with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
