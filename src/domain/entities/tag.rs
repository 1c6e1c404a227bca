//! Tag entity representing the resolved state of a physical tag.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a physical tag.
///
/// An unrecognized token is represented by the *absence* of a [`TagState`],
/// never by a status variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Active,
    Suspended,
    Lost,
    Unclaimed,
}

/// What a tag points at when scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Profile,
    Url,
}

/// Resolved snapshot of a physical tag, as returned by the lookup service
/// and cached under `hw:{token}`.
///
/// # Invariant
///
/// `target_type == Url` implies `target_url` is non-empty, but the URL is
/// re-validated at resolution time rather than trusted from storage or cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagState {
    pub id: String,
    pub status: TagStatus,
    /// Owning account, if claimed. Absent means unclaimed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub target_type: TargetType,
    /// Present only when `target_type == Url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    /// Sub-profile slug, present only for profile targets aimed at a
    /// specific sub-profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_profile_slug: Option<String>,
}

impl TagState {
    /// Returns true if the tag has an owning account.
    pub fn is_claimed(&self) -> bool {
        self.owner_id.is_some()
    }
}
