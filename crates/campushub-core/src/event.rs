// Event entity and write payloads
//
// The hackathons collection shares this schema in a parallel collection, so
// the same types serve both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community event as stored in the `events` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// Defaults to empty when the remote row lacks it, so sorting and
    /// searching degrade instead of failing the whole list.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Zero-padded `HH:MM`, kept as text so untimed events stay
    /// distinguishable from midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub linkedin_posted: bool,
    #[serde(default)]
    pub whatsapp_posted: bool,
    #[serde(default)]
    pub newsletter_posted: bool,
    #[serde(default)]
    pub highlighted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Promotion channels tracked per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoChannel {
    LinkedIn,
    WhatsApp,
    Newsletter,
}

/// Fields for creating an event. New events start unposted and unhighlighted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewEvent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Partial update; only present fields are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_posted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_posted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_posted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
}

impl EventPatch {
    /// Patch toggling the highlight flag only.
    pub fn highlight(highlighted: bool) -> Self {
        Self {
            highlighted: Some(highlighted),
            ..Self::default()
        }
    }

    /// Patch marking one promotion channel as posted (or not).
    pub fn posted(channel: PromoChannel, posted: bool) -> Self {
        let mut patch = Self::default();
        match channel {
            PromoChannel::LinkedIn => patch.linkedin_posted = Some(posted),
            PromoChannel::WhatsApp => patch.whatsapp_posted = Some(posted),
            PromoChannel::Newsletter => patch.newsletter_posted = Some(posted),
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = EventPatch::posted(PromoChannel::WhatsApp, true);
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["whatsapp_posted"], true);
    }

    #[test]
    fn event_tolerates_missing_optional_columns() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": "6b8e3a0e-2f6d-4a86-9c41-0c3a5b1f0a11",
            "name": "Intro to Rust",
            "created_at": "2026-01-10T12:00:00Z"
        }))
        .unwrap();
        assert!(event.start_date.is_none());
        assert!(!event.highlighted);
    }
}
