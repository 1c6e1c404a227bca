//! Redirect destination policy for resolved tag state.
//!
//! Every branch terminates in a concrete redirect: a scanned physical object
//! must always produce some coherent response, so failure modes degrade to a
//! dedicated informational page instead of surfacing an error to the visitor.

use std::sync::Arc;

use tracing::warn;

use crate::domain::collaborators::AccountLookup;
use crate::domain::entities::{TagState, TagStatus, TargetType};
use crate::utils::sanitize::sanitize_redirect;

/// Static destinations for the terminal resolution outcomes, derived from the
/// public site base URL.
#[derive(Debug, Clone)]
pub struct Destinations {
    pub suspended: String,
    pub lost: String,
    pub invalid_target: String,
    pub claim: String,
    /// Base under which `/{handle}` profile paths live.
    pub profile_base: String,
}

impl Destinations {
    pub fn from_site_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            suspended: format!("{}/suspended", base),
            lost: format!("{}/safety/lost", base),
            invalid_target: format!("{}/invalid-target", base),
            claim: format!("{}/claim", base),
            profile_base: base.to_string(),
        }
    }
}

/// Closed set of redirect outcomes.
///
/// The resolver has no error output visible to the end user; variants that
/// represent failures map to informational pages via [`Resolution::location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Sanitized external URL target.
    External(String),
    /// Profile path under the public site, e.g. `/maya` or `/maya/work`.
    Profile(String),
    Suspended,
    Lost,
    /// The stored URL failed sanitization.
    InvalidTarget,
    /// Tag exists but no owner handle is resolvable.
    Unclaimed,
    /// Token has no corresponding tag, or the lookup service was unreachable.
    NotFound,
}

impl Resolution {
    /// Maps the outcome to a concrete redirect URL.
    pub fn location(&self, destinations: &Destinations) -> String {
        match self {
            Resolution::External(url) => url.clone(),
            Resolution::Profile(path) => format!("{}{}", destinations.profile_base, path),
            Resolution::Suspended => destinations.suspended.clone(),
            Resolution::Lost => destinations.lost.clone(),
            Resolution::InvalidTarget => destinations.invalid_target.clone(),
            // An unrecognized token still corresponds to a physical object a
            // user is holding: prompt them to register it.
            Resolution::Unclaimed | Resolution::NotFound => destinations.claim.clone(),
        }
    }
}

/// Decides the final redirect destination from resolved tag state.
pub struct TargetResolver {
    accounts: Arc<dyn AccountLookup>,
    destinations: Destinations,
}

impl TargetResolver {
    pub fn new(accounts: Arc<dyn AccountLookup>, destinations: Destinations) -> Self {
        Self {
            accounts,
            destinations,
        }
    }

    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    /// Resolves a tag state to a redirect outcome. Total: every input maps to
    /// a destination.
    ///
    /// Policy, in order: suspended and lost status pages win over any target;
    /// URL targets are re-sanitized on every resolution (cached state never
    /// bypasses current policy); profile targets resolve the owner's public
    /// handle; anything without a resolvable owner degrades to the
    /// registration destination.
    pub async fn resolve(&self, state: &TagState) -> Resolution {
        match state.status {
            TagStatus::Suspended => return Resolution::Suspended,
            TagStatus::Lost => return Resolution::Lost,
            TagStatus::Active | TagStatus::Unclaimed => {}
        }

        match state.target_type {
            TargetType::Url => self.resolve_url_target(state),
            TargetType::Profile => self.resolve_profile_target(state).await,
        }
    }

    /// Convenience wrapper mapping an outcome straight to its redirect URL.
    pub fn location_of(&self, resolution: &Resolution) -> String {
        resolution.location(&self.destinations)
    }

    fn resolve_url_target(&self, state: &TagState) -> Resolution {
        let Some(raw) = state.target_url.as_deref() else {
            warn!(tag_id = %state.id, "URL-target tag has no stored URL");
            return Resolution::InvalidTarget;
        };

        match sanitize_redirect(raw) {
            Ok(url) => Resolution::External(url),
            Err(e) => {
                warn!(tag_id = %state.id, "Rejected stored redirect target: {}", e);
                Resolution::InvalidTarget
            }
        }
    }

    async fn resolve_profile_target(&self, state: &TagState) -> Resolution {
        let Some(owner_id) = state.owner_id.as_deref() else {
            return Resolution::Unclaimed;
        };

        match self.accounts.fetch_handle(owner_id).await {
            Ok(Some(handle)) => {
                let path = match state.target_profile_slug.as_deref() {
                    Some(slug) => format!("/{}/{}", handle, slug),
                    None => format!("/{}", handle),
                };
                Resolution::Profile(path)
            }
            Ok(None) => Resolution::Unclaimed,
            Err(e) => {
                warn!(tag_id = %state.id, "Handle lookup failed: {}", e);
                Resolution::Unclaimed
            }
        }
    }
}
