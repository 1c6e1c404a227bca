//! Coarse device and referrer classification from request headers.

use crate::domain::entities::DeviceClass;
use url::Url;

/// Classifies a User-Agent string into a coarse device category.
///
/// Precedence matters and is part of the contract: bot patterns win over
/// everything else (a crawler advertising an Android UA is still a bot), then
/// mobile, then tablet. Android UAs that also contain `tablet` fall through to
/// the tablet branch. Anything unmatched, including a missing header, is
/// `desktop`.
pub fn classify_device(user_agent: Option<&str>) -> DeviceClass {
    let ua = match user_agent {
        Some(ua) => ua.to_ascii_lowercase(),
        None => return DeviceClass::Desktop,
    };

    if ua.contains("bot") || ua.contains("crawler") || ua.contains("spider") {
        return DeviceClass::Bot;
    }

    let android_tablet = ua.contains("android") && ua.contains("tablet");
    if !android_tablet && (ua.contains("mobile") || ua.contains("iphone") || ua.contains("android"))
    {
        return DeviceClass::Mobile;
    }

    if ua.contains("ipad") || ua.contains("tablet") {
        return DeviceClass::Tablet;
    }

    DeviceClass::Desktop
}

/// Extracts the bare host from a Referer header value.
///
/// Returns an empty string for missing, relative, or unparsable referrers.
/// Total, never panics.
pub fn host_only(referrer: Option<&str>) -> String {
    referrer
        .and_then(|r| Url::parse(r).ok())
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default()
}
