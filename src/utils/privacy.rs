//! Daily-salted IP hashing for anonymized analytics.
//!
//! Scan events never carry a raw client IP. Instead the IP is run through
//! SHA-256 together with a salt that rotates at UTC midnight, so hashes can be
//! correlated within a calendar day (dedup, rate limiting) but not across days
//! without the secret.

use chrono::{NaiveDate, Utc};
use sha2::{Digest, Sha256};

/// Placeholder used when the request carried no resolvable client address.
///
/// Hashing a fixed placeholder keeps [`PrivacyHasher::hash`] total; downstream
/// consumers see a stable "unknown" bucket instead of a missing field.
const MISSING_IP: &str = "0.0.0.0";

/// One-way hasher for client IP addresses.
///
/// The digest is `SHA-256(ip || "|" || secret || ":" || utc_date)`, hex-encoded
/// to 64 characters. The date component rotates the effective salt once per
/// UTC day; the secret is injected at construction so tests can pin it.
#[derive(Debug, Clone)]
pub struct PrivacyHasher {
    secret: String,
}

impl PrivacyHasher {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Hashes a client IP with today's salt.
    ///
    /// Missing IPs hash the [`MISSING_IP`] placeholder rather than failing.
    pub fn hash(&self, ip: Option<&str>) -> String {
        self.hash_on(ip, Utc::now().date_naive())
    }

    /// Hashes a client IP with the salt for an explicit UTC date.
    ///
    /// Exists so the daily-rotation property is testable without waiting for
    /// midnight.
    pub fn hash_on(&self, ip: Option<&str>, date: NaiveDate) -> String {
        let ip = ip.unwrap_or(MISSING_IP);
        let salt = format!("{}:{}", self.secret, date.format("%Y-%m-%d"));

        let mut hasher = Sha256::new();
        hasher.update(ip.as_bytes());
        hasher.update(b"|");
        hasher.update(salt.as_bytes());

        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_hash_is_64_hex_chars() {
        let hasher = PrivacyHasher::new("test-secret");
        let digest = hasher.hash(Some("203.0.113.7"));

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_deterministic_within_a_day() {
        let hasher = PrivacyHasher::new("test-secret");
        let date = fixed_date();

        assert_eq!(
            hasher.hash_on(Some("203.0.113.7"), date),
            hasher.hash_on(Some("203.0.113.7"), date)
        );
    }

    #[test]
    fn test_hash_rotates_across_dates() {
        let hasher = PrivacyHasher::new("test-secret");
        let day_one = fixed_date();
        let day_two = day_one.succ_opt().unwrap();

        assert_ne!(
            hasher.hash_on(Some("203.0.113.7"), day_one),
            hasher.hash_on(Some("203.0.113.7"), day_two)
        );
    }

    #[test]
    fn test_hash_differs_per_secret() {
        let date = fixed_date();

        assert_ne!(
            PrivacyHasher::new("a").hash_on(Some("203.0.113.7"), date),
            PrivacyHasher::new("b").hash_on(Some("203.0.113.7"), date)
        );
    }

    #[test]
    fn test_missing_ip_uses_placeholder() {
        let hasher = PrivacyHasher::new("test-secret");
        let date = fixed_date();

        assert_eq!(
            hasher.hash_on(None, date),
            hasher.hash_on(Some("0.0.0.0"), date)
        );
    }

    #[test]
    fn test_different_ips_differ() {
        let hasher = PrivacyHasher::new("test-secret");
        let date = fixed_date();

        assert_ne!(
            hasher.hash_on(Some("203.0.113.7"), date),
            hasher.hash_on(Some("203.0.113.8"), date)
        );
    }
}
