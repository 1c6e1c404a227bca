//! Analytics event model for scan and interaction tracking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of interaction recorded against a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Scan,
    VcardDl,
    LeadSubmit,
    ContactClick,
    Claim,
    TargetChange,
    Transfer,
}

/// Coarse device category derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
    Bot,
}

/// An immutable, append-only analytics fact.
///
/// Built once by [`crate::application::services::EventRecorder`] at scan time
/// and handed to the ingestion collaborator; never mutated afterwards. The
/// client IP appears only as `ip_hash`, a 64-character hex digest produced by
/// [`crate::utils::privacy::PrivacyHasher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub tag_id: String,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub device: DeviceClass,
    /// Bare referring host, empty when the referrer was missing or unparsable.
    pub referrer_host: String,
    /// Daily-salted SHA-256 digest of the client IP. Never the raw IP.
    pub ip_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Request metadata a handler passes to the event recorder.
///
/// All fields are optional so missing headers degrade gracefully rather than
/// failing event construction.
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub utm: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&EventType::VcardDl).unwrap(),
            "\"vcard_dl\""
        );
        assert_eq!(
            serde_json::to_string(&EventType::TargetChange).unwrap(),
            "\"target_change\""
        );

        let parsed: EventType = serde_json::from_str("\"lead_submit\"").unwrap();
        assert_eq!(parsed, EventType::LeadSubmit);
    }

    #[test]
    fn test_device_wire_format() {
        assert_eq!(
            serde_json::to_string(&DeviceClass::Mobile).unwrap(),
            "\"mobile\""
        );
    }

    #[test]
    fn test_event_round_trip() {
        let event = AnalyticsEvent {
            tag_id: "tag-1".to_string(),
            event_type: EventType::Scan,
            country: Some("DE".to_string()),
            device: DeviceClass::Mobile,
            referrer_host: "news.example.com".to_string(),
            ip_hash: "ab".repeat(32),
            utm: None,
            metadata: None,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: AnalyticsEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_scan_context_default_is_empty() {
        let ctx = ScanContext::default();
        assert!(ctx.ip.is_none());
        assert!(ctx.user_agent.is_none());
        assert!(ctx.referrer.is_none());
    }
}
